/// 通常賃金が適用される1日あたりの時間。
const REGULAR_HOURS: f64 = 8.0;

/// 1段階目の残業に該当する時間。
const OVERTIME_TIER1_HOURS: f64 = 2.0;

/// 2段階目の残業に該当する時間。
const OVERTIME_TIER2_HOURS: f64 = 2.0;

const OVERTIME_TIER1_RATE: f64 = 1.25;
const OVERTIME_TIER2_RATE: f64 = 1.5;

/// 2段階目を超えた残業の割増率。2段階目と同じ率とする。
const EXTRA_OVERTIME_RATE: f64 = 1.5;

/// 1件の勤務に対する給与を計算する。
///
/// 8時間までは時給そのまま、続く2時間は1.25倍、その後は1.5倍で計算する。
/// 入力の検証は行わない。
///
/// # Arguments
///
/// * `hours_worked` - 小数の実労働時間
/// * `hourly_rate` - 時給
pub fn compute_pay(hours_worked: f64, hourly_rate: f64) -> f64 {
    let regular = hours_worked.min(REGULAR_HOURS);
    let overtime = (hours_worked - REGULAR_HOURS).max(0.0);

    let tier1 = overtime.min(OVERTIME_TIER1_HOURS);
    let tier2 = (overtime - OVERTIME_TIER1_HOURS).clamp(0.0, OVERTIME_TIER2_HOURS);
    let tier3 = (overtime - OVERTIME_TIER1_HOURS - OVERTIME_TIER2_HOURS).max(0.0);

    regular * hourly_rate
        + tier1 * hourly_rate * OVERTIME_TIER1_RATE
        + tier2 * hourly_rate * OVERTIME_TIER2_RATE
        + tier3 * hourly_rate * EXTRA_OVERTIME_RATE
}
