use serde::{Deserialize, Serialize};

use crate::{
    condition::{PrecipitationType, classify_at},
    model::{DayToken, HourlyRecord},
    translate::Translations,
};

const SHORT_TEMPLATE: &str = "{day}{hour}h {kind}";
const LONG_TEMPLATE: &str = "{hour}h until {amount}mm";
const NO_PRECIPITATION: &str = "no rain";
const NEXT_DAY: &str = "tomorrow";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationWindow {
    pub onset_hour: Option<u32>,
    pub onset_day: Option<DayToken>,
    pub run_end_hour: Option<u32>,
    /// Sum over the whole window, one decimal.
    pub total_amount: f64,
    /// Sum over the onset run only, one decimal.
    pub run_amount: f64,
    pub peak_probability: u8,
    pub precipitation_type: PrecipitationType,
    pub summary_short: String,
    pub summary_long: String,
}

impl PrecipitationWindow {
    /// The "no precipitation" result.
    pub fn dry(tr: &Translations) -> Self {
        Self {
            onset_hour: None,
            onset_day: None,
            run_end_hour: None,
            total_amount: 0.0,
            run_amount: 0.0,
            peak_probability: 0,
            precipitation_type: PrecipitationType::None,
            summary_short: tr.translate(NO_PRECIPITATION),
            summary_long: String::new(),
        }
    }

    pub fn is_dry(&self) -> bool {
        self.onset_hour.is_none()
    }
}

/// Scan the first `limit` hours of `hours`.
///
/// Reports the first wet hour (the onset), the contiguous wet run starting
/// there, and the total amount and peak probability over the whole window.
/// The run stops at the first dry hour; totals keep accumulating.
///
/// `reference_day` is the day the caller considers "today"; an onset on any
/// other day gets the next-day prefix in `summary_short`.
pub fn scan_window(
    hours: &[HourlyRecord],
    limit: usize,
    reference_day: Option<&DayToken>,
    tr: &Translations,
) -> PrecipitationWindow {
    let window = &hours[..limit.min(hours.len())];

    let mut total = 0.0;
    let mut peak = 0u8;
    let mut onset: Option<usize> = None;
    let mut run_end = 0;
    let mut run_amount = 0.0;

    for (i, hour) in window.iter().enumerate() {
        let amount = hour.precipitation_amount;
        total += amount;
        peak = peak.max(hour.precipitation_probability);

        if amount <= 0.0 {
            continue;
        }
        match onset {
            None => {
                onset = Some(i);
                run_end = i;
                run_amount = amount;
            }
            Some(_) if i == run_end + 1 => {
                run_end = i;
                run_amount += amount;
            }
            Some(_) => {}
        }
    }

    tracing::debug!(limit, hours = window.len(), ?onset, total, "Scanned precipitation window");

    let Some(onset) = onset.filter(|_| total > 0.0) else {
        return PrecipitationWindow::dry(tr);
    };

    let start = &window[onset];
    let end = &window[run_end];
    let total_amount = round1(total);
    let precipitation_type =
        PrecipitationType::from_condition(classify_at(start.icon_code, start.day_or_night));

    let day_prefix = match reference_day {
        Some(day) if *day != start.day => format!("{} ", tr.translate(NEXT_DAY)),
        _ => String::new(),
    };

    let summary_short = tr.fill(
        SHORT_TEMPLATE,
        &[
            ("day", day_prefix.as_str()),
            ("hour", start.hour.to_string().as_str()),
            ("kind", tr.translate(precipitation_type.as_str()).as_str()),
        ],
    );
    let summary_long = tr.fill(
        LONG_TEMPLATE,
        &[
            ("hour", end.hour.to_string().as_str()),
            ("amount", format_decimal(total_amount).as_str()),
        ],
    );

    PrecipitationWindow {
        onset_hour: Some(start.hour),
        onset_day: Some(start.day.clone()),
        run_end_hour: Some(end.hour),
        total_amount,
        run_amount: round1(run_amount),
        peak_probability: peak,
        precipitation_type,
        summary_short,
        summary_long,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Whole numbers without decimals, anything else with one.
pub fn format_decimal(v: f64) -> String {
    let v = round1(v);
    if v.fract() == 0.0 { format!("{}", v as i64) } else { format!("{v:.1}") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::DayOrNight;

    fn hour(h: u32, day: u32, prec: f64, pop: u8, wx: i64) -> HourlyRecord {
        HourlyRecord::new(h, day, 7, prec, pop, wx, DayOrNight::Day)
    }

    fn sample() -> Vec<HourlyRecord> {
        vec![
            hour(13, 1, 0.0, 10, 100),
            hour(14, 1, 0.5, 40, 300),
            hour(15, 1, 0.5, 60, 300),
            hour(16, 1, 0.0, 20, 100),
        ]
    }

    #[test]
    fn onset_run_and_totals() {
        let tr = Translations::default();
        let day = DayToken::from(1);
        let w = scan_window(&sample(), 4, Some(&day), &tr);

        assert_eq!(w.onset_hour, Some(14));
        assert_eq!(w.onset_day, Some(DayToken::from(1)));
        assert_eq!(w.run_end_hour, Some(15));
        assert_eq!(w.run_amount, 1.0);
        assert_eq!(w.total_amount, 1.0);
        assert_eq!(w.peak_probability, 60);
        assert_eq!(w.precipitation_type, PrecipitationType::Rain);
        assert_eq!(w.summary_short, "14h rain");
        assert_eq!(w.summary_long, "15h until 1mm");
    }

    #[test]
    fn zero_limit_is_dry() {
        let tr = Translations::default();
        let w = scan_window(&sample(), 0, None, &tr);
        assert_eq!(w, PrecipitationWindow::dry(&tr));
        assert_eq!(w.summary_short, "no rain");
    }

    #[test]
    fn empty_sequence_is_dry() {
        let tr = Translations::default();
        assert!(scan_window(&[], 12, None, &tr).is_dry());
    }

    #[test]
    fn dry_window_ignores_probability() {
        let tr = Translations::default();
        let hours = vec![hour(9, 1, 0.0, 90, 300), hour(10, 1, 0.0, 100, 300)];
        let w = scan_window(&hours, 2, None, &tr);

        assert!(w.is_dry());
        assert_eq!(w.peak_probability, 0);
        assert_eq!(w.total_amount, 0.0);
    }

    #[test]
    fn limit_past_end_is_clamped() {
        let tr = Translations::default();
        let w = scan_window(&sample(), 100, None, &tr);
        assert_eq!(w.onset_hour, Some(14));
    }

    #[test]
    fn limit_excludes_later_hours() {
        let tr = Translations::default();
        assert!(scan_window(&sample(), 1, None, &tr).is_dry());

        let w = scan_window(&sample(), 2, None, &tr);
        assert_eq!(w.run_end_hour, Some(14));
        assert_eq!(w.total_amount, 0.5);
        assert_eq!(w.summary_long, "14h until 0.5mm");
    }

    #[test]
    fn run_stops_at_gap_but_total_continues() {
        let tr = Translations::default();
        let hours = vec![
            hour(6, 1, 1.2, 50, 300),
            hour(7, 1, 0.0, 30, 200),
            hour(8, 1, 2.0, 80, 300),
            hour(9, 1, 0.3, 70, 300),
        ];
        let w = scan_window(&hours, 4, None, &tr);

        assert_eq!(w.onset_hour, Some(6));
        assert_eq!(w.run_end_hour, Some(6));
        assert_eq!(w.run_amount, 1.2);
        assert_eq!(w.total_amount, 3.5);
        assert_eq!(w.peak_probability, 80);
        assert_eq!(w.summary_long, "6h until 3.5mm");
        assert!(w.run_amount <= w.total_amount);
    }

    #[test]
    fn onset_on_another_day_gets_prefix() {
        let tr = Translations::default();
        let hours = vec![hour(23, 1, 0.0, 10, 100), hour(0, 2, 0.7, 60, 400)];
        let today = DayToken::from(1);
        let w = scan_window(&hours, 2, Some(&today), &tr);

        assert_eq!(w.precipitation_type, PrecipitationType::Snow);
        assert_eq!(w.summary_short, "tomorrow 0h snow");
    }

    #[test]
    fn no_reference_day_means_no_prefix() {
        let tr = Translations::default();
        let hours = vec![hour(0, 2, 0.7, 60, 303)];
        let w = scan_window(&hours, 1, None, &tr);
        assert_eq!(w.summary_short, "0h snowrainy");
    }

    #[test]
    fn localized_summaries() {
        let tr = Translations::from_json_str(
            r#"{
                "{day}{hour}h {kind}": "{day}{hour}시 {kind}",
                "{hour}h until {amount}mm": "{hour}시까지 {amount}mm",
                "tomorrow": "내일",
                "rain": "비"
            }"#,
        )
        .unwrap();
        let hours = vec![hour(22, 1, 0.0, 10, 100), hour(5, 2, 1.0, 60, 300), hour(6, 2, 0.25, 60, 300)];
        let today = DayToken::from(1);
        let w = scan_window(&hours, 3, Some(&today), &tr);

        assert_eq!(w.summary_short, "내일 5시 비");
        assert_eq!(w.summary_long, "6시까지 1.3mm");
    }

    #[test]
    fn amount_formatting() {
        assert_eq!(format_decimal(1.0), "1");
        assert_eq!(format_decimal(0.5), "0.5");
        assert_eq!(format_decimal(2.04), "2");
        assert_eq!(format_decimal(12.25), "12.3");
    }
}
