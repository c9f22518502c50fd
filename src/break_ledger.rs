use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{TrackerError, TrackerResult};

/// 休憩1回分の区間。
///
/// `end`が未設定の場合は休憩中(終了していない)を表す。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
}

impl BreakInterval {
    /// 休憩の秒数を返す。
    ///
    /// 開始と終了の両方が揃っていない場合や、終了が開始より前の場合は0とする。
    pub fn seconds(&self) -> i64 {
        match (self.start, self.end) {
            (Some(start), Some(end)) => (end - start).num_seconds().max(0),
            _ => 0,
        }
    }
}

/// 編集対象となる休憩のフィールド。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakField {
    Start,
    End,
}

/// 1件の勤務に紐づく休憩の一覧。
///
/// 追加した順序を保持し、時系列への並び替えは行わない。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakLedger(Vec<BreakInterval>);

impl BreakLedger {
    /// 空の休憩を末尾に追加する。
    pub fn add_break(&mut self) {
        self.0.push(BreakInterval::default());
    }

    /// 全ての休憩を指定した時間だけずらす。勤務記録の日付を変更した場合に利用する。
    pub fn shift(&mut self, delta: Duration) {
        for interval in &mut self.0 {
            interval.start = interval.start.map(|start| start + delta);
            interval.end = interval.end.map(|end| end + delta);
        }
    }

    /// 指定した休憩の開始または終了を置き換える。
    ///
    /// 時系列の妥当性は検証しない。
    ///
    /// # Arguments
    ///
    /// * `index` - 休憩の位置
    /// * `field` - 置き換えるフィールド
    /// * `value` - 新しい値。`None`の場合は未設定にする
    pub fn edit_break_field(
        &mut self,
        index: usize,
        field: BreakField,
        value: Option<NaiveDateTime>,
    ) -> TrackerResult<()> {
        let len = self.0.len();
        let interval = self
            .0
            .get_mut(index)
            .ok_or(TrackerError::BreakIndexOutOfRange { index, len })?;

        match field {
            BreakField::Start => interval.start = value,
            BreakField::End => interval.end = value,
        }

        Ok(())
    }

    /// 指定した休憩を削除する。残りの休憩の順序は保持する。
    pub fn remove_break(&mut self, index: usize) -> TrackerResult<BreakInterval> {
        if index >= self.0.len() {
            return Err(TrackerError::BreakIndexOutOfRange {
                index,
                len: self.0.len(),
            });
        }

        Ok(self.0.remove(index))
    }

    /// 休憩の合計秒を返す。休憩中や不正な区間は0秒として扱う。
    pub fn total_seconds(&self) -> i64 {
        self.0.iter().map(BreakInterval::seconds).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BreakInterval> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<BreakInterval>> for BreakLedger {
    fn from(intervals: Vec<BreakInterval>) -> Self {
        Self(intervals)
    }
}

impl<'a> IntoIterator for &'a BreakLedger {
    type Item = &'a BreakInterval;
    type IntoIter = std::slice::Iter<'a, BreakInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
