#[cfg(test)]
mod tests {
    use cadence::libs::recurrence::{
        describe_pattern, nth_date, parse_weekdays, upcoming_dates, PatternError, RecurrenceKind, RecurrencePattern, CUSTOM_PATTERN,
        MAX_INTERVAL,
    };
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_describe_interval_one_reads_adverbially() {
        assert_eq!(describe_pattern(&RecurrencePattern::daily(1)), "Repeats daily");
        assert_eq!(describe_pattern(&RecurrencePattern::weekly(1)), "Repeats weekly");
        assert_eq!(describe_pattern(&RecurrencePattern::monthly(1)), "Repeats monthly");
        assert_eq!(describe_pattern(&RecurrencePattern::yearly(1)), "Repeats yearly");
        assert!(!describe_pattern(&RecurrencePattern::daily(1)).contains("every 1"));
    }

    #[test]
    fn test_describe_with_interval() {
        assert!(describe_pattern(&RecurrencePattern::daily(2)).contains("every 2 days"));
        assert_eq!(describe_pattern(&RecurrencePattern::yearly(3)), "Repeats every 3 years");
    }

    #[test]
    fn test_describe_weekdays_and_day_of_month() {
        let weekly = RecurrencePattern::weekly(2).with_days_of_week(vec![3, 1]);
        assert_eq!(describe_pattern(&weekly), "Repeats every 2 weeks on Wed, Mon");

        let monthly = RecurrencePattern::monthly(1).with_day_of_month(31);
        assert_eq!(describe_pattern(&monthly), "Repeats monthly on the 31st");

        let until = RecurrencePattern::monthly(1).with_day_of_month(2).with_end_date(date(2024, 12, 31));
        assert_eq!(until.to_string(), "Repeats monthly on the 2nd until 2024-12-31");
    }

    #[test]
    fn test_describe_unknown_type() {
        let pattern: RecurrencePattern = serde_json::from_str(r#"{"type":"fortnightly","interval":1}"#).unwrap();
        assert_eq!(describe_pattern(&pattern), CUSTOM_PATTERN);
    }

    #[test]
    fn test_unknown_type_is_normalized_when_written_back() {
        let pattern: RecurrencePattern = serde_json::from_str(r#"{"type":"hourly","interval":2}"#).unwrap();
        assert_eq!(pattern.kind, RecurrenceKind::Unrecognized);
        assert_eq!(pattern.interval, 2);
        assert_eq!(serde_json::to_string(&pattern).unwrap(), r#"{"type":"unrecognized","interval":2}"#);
        assert!(pattern.validate().is_err());
    }

    #[test]
    fn test_pattern_json_round_trip() {
        let json = r#"{"type":"monthly","interval":1,"endDate":"2024-12-31","dayOfMonth":15}"#;
        let pattern: RecurrencePattern = serde_json::from_str(json).unwrap();
        assert_eq!(pattern.kind, RecurrenceKind::Monthly);
        assert_eq!(pattern.end_date, Some(date(2024, 12, 31)));
        assert_eq!(pattern.day_of_month, Some(15));
        assert_eq!(serde_json::to_string(&pattern).unwrap(), json);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Weekly".parse::<RecurrenceKind>().unwrap(), RecurrenceKind::Weekly);
        assert_eq!("annually".parse::<RecurrenceKind>().unwrap(), RecurrenceKind::Yearly);
        assert!(matches!("hourly".parse::<RecurrenceKind>(), Err(PatternError::UnknownKind(_))));
    }

    #[test]
    fn test_parse_weekdays() {
        assert_eq!(parse_weekdays("mon, wed,fri").unwrap(), vec![1, 3, 5]);
        assert_eq!(parse_weekdays("0,6").unwrap(), vec![0, 6]);
        assert_eq!(parse_weekdays("fri,mon,fri").unwrap(), vec![5, 1]);
        assert!(matches!(parse_weekdays("7"), Err(PatternError::WeekdayOutOfRange(7))));
        assert!(matches!(parse_weekdays("funday"), Err(PatternError::UnknownWeekday(_))));
    }

    #[test]
    fn test_validate() {
        assert!(RecurrencePattern::daily(1).validate().is_ok());
        assert!(matches!(RecurrencePattern::daily(0).validate(), Err(PatternError::ZeroInterval)));
        assert!(RecurrencePattern::weekly(MAX_INTERVAL).with_days_of_week(vec![1]).validate().is_ok());
        assert!(matches!(
            RecurrencePattern::weekly(MAX_INTERVAL + 1).with_days_of_week(vec![1]).validate(),
            Err(PatternError::IntervalTooLarge(_))
        ));
        assert!(matches!(
            RecurrencePattern::monthly(1).with_day_of_month(32).validate(),
            Err(PatternError::DayOfMonthOutOfRange(32))
        ));
        assert!(matches!(
            RecurrencePattern::daily(1).with_days_of_week(vec![1]).validate(),
            Err(PatternError::DaysOfWeekNotWeekly)
        ));
        assert!(matches!(
            RecurrencePattern::weekly(1).with_day_of_month(3).validate(),
            Err(PatternError::DayOfMonthNotMonthly)
        ));
    }

    #[test]
    fn test_nth_date_matches_upcoming_dates() {
        let pattern = RecurrencePattern::weekly(1).with_days_of_week(vec![2, 4]);
        let anchor = date(2024, 1, 1);
        let upcoming = upcoming_dates(&pattern, anchor, 6);

        assert_eq!(upcoming.len(), 6);
        for (i, expected) in upcoming.iter().enumerate() {
            assert_eq!(nth_date(&pattern, anchor, i + 1), Some(*expected));
        }
        assert_eq!(nth_date(&pattern, anchor, 0), Some(anchor));
    }
}
