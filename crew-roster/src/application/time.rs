use chrono::NaiveDate;

// 境界仕様: 日付は "YYYY-MM-DD" 文字列で受け渡します（タイムゾーンは持ちません）
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_iso_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .map_err(|_| format!("日付の形式が不正です（YYYY-MM-DD を期待）: {}", value))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// 複数の日付文字列をまとめてパースする。1つでも不正なら全体をエラーにします
pub fn parse_iso_dates(values: &[String]) -> Result<Vec<NaiveDate>, String> {
    values.iter().map(|v| parse_iso_date(v)).collect()
}

/// start から end までの日付リストを作る（両端を含む）。
/// start が end より後の場合は空を返します
pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current = match current.succ_opt() {
            Some(next) => next,
            None => break, // カレンダーの上限（実用上は到達しない）
        };
    }
    dates
}
