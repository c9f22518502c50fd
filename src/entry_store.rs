use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::break_ledger::BreakLedger;
use crate::errors::{TrackerError, TrackerResult};
use crate::storage::{KeyValueStore, HOURS_ENTRIES_KEY};
use crate::time_entry::TimeEntry;

/// 編集中の勤務記録。
///
/// 元の勤務記録から切り離されたコピーで、[`EntryStore::commit_edit`]で保存するまで
/// ストアには影響しない。破棄すれば編集の取り消しになる。
#[derive(Clone, Debug, PartialEq)]
pub struct EntryEdit {
    id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub breaks: BreakLedger,
}

impl EntryEdit {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// 勤務記録の一覧を管理する。
///
/// 変更のたびに一覧全体を`KeyValueStore`に保存する。一覧が空になった場合は保存先から削除する。
pub struct EntryStore<S: KeyValueStore> {
    storage: S,
    entries: Vec<TimeEntry>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// 保存されている勤務記録を読み込んで新しい`EntryStore`を返す。
    ///
    /// # Arguments
    ///
    /// * `storage` - 勤務記録の保存先
    pub fn load(storage: S) -> TrackerResult<Self> {
        let entries = match storage.get(HOURS_ENTRIES_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        info!("Loaded {} time entries", entries.len());

        Ok(Self { storage, entries })
    }

    /// 追加順の勤務記録を返す。
    pub fn list(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&TimeEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 勤務記録を追加する。
    ///
    /// 開始または終了が未入力の場合や、給与が有限の値にならない場合はエラーを返し、
    /// ストアは変更しない。終了が開始より前でも追加し、実労働時間は0になる。
    ///
    /// # Arguments
    ///
    /// * `start` - 勤務の開始日時。勤務記録の日付は開始日時の日付とする
    /// * `end` - 勤務の終了日時
    /// * `breaks` - 休憩の一覧
    /// * `hourly_rate` - 給与計算に利用する時給
    pub fn create(
        &mut self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        breaks: BreakLedger,
        hourly_rate: f64,
    ) -> TrackerResult<TimeEntry> {
        let start = start.ok_or(TrackerError::MissingInput("start time"))?;
        let end = end.ok_or(TrackerError::MissingInput("end time"))?;

        let entry = TimeEntry::new(
            Uuid::new_v4(),
            start.date(),
            start,
            end,
            breaks,
            hourly_rate,
        );
        ensure_finite_pay(&entry)?;
        let mut entries = self.entries.clone();
        entries.push(entry.clone());
        self.commit(entries)?;
        info!(
            "Added entry {}: {} ({})",
            entry.id(),
            entry.hours_worked(),
            entry.total_salary()
        );

        Ok(entry)
    }

    /// 勤務記録を置き換え、実労働時間と給与を再計算する。
    ///
    /// 存在しないidの場合は何もせず`None`を返す。
    pub fn update(
        &mut self,
        id: Uuid,
        date: NaiveDate,
        start: NaiveDateTime,
        end: NaiveDateTime,
        breaks: BreakLedger,
        hourly_rate: f64,
    ) -> TrackerResult<Option<TimeEntry>> {
        let Some(position) = self.position(id) else {
            warn!("Entry {} not found, nothing to update", id);
            return Ok(None);
        };

        let entry = TimeEntry::new(id, date, start, end, breaks, hourly_rate);
        ensure_finite_pay(&entry)?;
        let mut entries = self.entries.clone();
        entries[position] = entry.clone();
        self.commit(entries)?;
        info!(
            "Updated entry {}: {} ({})",
            id,
            entry.hours_worked(),
            entry.total_salary()
        );

        Ok(Some(entry))
    }

    /// 勤務記録を削除する。確認は呼び出し側で行う。
    ///
    /// 存在しないidの場合は何もせず`None`を返す。
    pub fn delete(&mut self, id: Uuid) -> TrackerResult<Option<TimeEntry>> {
        let Some(position) = self.position(id) else {
            warn!("Entry {} not found, nothing to delete", id);
            return Ok(None);
        };

        let mut entries = self.entries.clone();
        let removed = entries.remove(position);
        self.commit(entries)?;
        info!("Deleted entry {}", id);

        Ok(Some(removed))
    }

    /// 全ての勤務記録を削除し、削除した件数を返す。
    pub fn clear(&mut self) -> TrackerResult<usize> {
        let count = self.entries.len();
        self.commit(Vec::new())?;
        info!("Cleared {} entries", count);

        Ok(count)
    }

    /// 勤務記録の編集を開始する。存在しないidの場合は`None`を返す。
    pub fn begin_edit(&self, id: Uuid) -> Option<EntryEdit> {
        self.get(id).map(|entry| EntryEdit {
            id,
            date: entry.date(),
            start_time: entry.start_time(),
            end_time: entry.end_time(),
            breaks: entry.breaks().clone(),
        })
    }

    /// 編集内容を保存する。
    pub fn commit_edit(
        &mut self,
        edit: EntryEdit,
        hourly_rate: f64,
    ) -> TrackerResult<Option<TimeEntry>> {
        self.update(
            edit.id,
            edit.date,
            edit.start_time,
            edit.end_time,
            edit.breaks,
            hourly_rate,
        )
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    /// 保存に成功した場合のみ一覧を置き換える。
    fn commit(&mut self, entries: Vec<TimeEntry>) -> TrackerResult<()> {
        if entries.is_empty() {
            self.storage.remove(HOURS_ENTRIES_KEY)?;
            debug!("Removed persisted entries");
        } else {
            let json = serde_json::to_string(&entries)?;
            self.storage.set(HOURS_ENTRIES_KEY, &json)?;
            debug!("Persisted {} entries", entries.len());
        }
        self.entries = entries;

        Ok(())
    }
}

/// JSONでは`inf`や`NaN`を表現できないため、保存前に給与を検証する。
fn ensure_finite_pay(entry: &TimeEntry) -> TrackerResult<()> {
    if entry.total_salary().is_finite() {
        Ok(())
    } else {
        Err(TrackerError::NonFinitePay(entry.total_salary()))
    }
}
