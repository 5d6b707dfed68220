#[cfg(test)]
mod tests {
    use cadence::db::tasks::{NextOccurrence, Tasks};
    use cadence::libs::recurrence::{FixedClock, RandomIds, RecurrenceEngine, RecurrencePattern};
    use cadence::libs::task::{Task, TaskFilter, TaskPriority, TaskStatus};
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use uuid::Uuid;

    struct TaskTestContext {
        _temp_dir: TempDir,
        tasks: Tasks,
        engine: RecurrenceEngine<FixedClock, RandomIds>,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let tasks = Tasks::open(&temp_dir.path().join("cadence.db")).unwrap();
            let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
            TaskTestContext {
                _temp_dir: temp_dir,
                tasks,
                engine: RecurrenceEngine::with_parts(clock, RandomIds),
            }
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_insert_and_get_round_trips_all_fields(ctx: &mut TaskTestContext) {
        let task = Task::new("Water plants", "balcony")
            .with_due_date(date(2024, 1, 3))
            .with_priority(TaskPriority::High)
            .with_pattern(Some(RecurrencePattern::weekly(2).with_days_of_week(vec![1, 3]).with_end_date(date(2024, 6, 30))));
        ctx.tasks.insert(&task).unwrap();

        let stored = ctx.tasks.get_by_id(task.id).unwrap().unwrap();
        assert_eq!(stored.id, task.id);
        assert_eq!(stored.name, "Water plants");
        assert_eq!(stored.priority, TaskPriority::High);
        assert_eq!(stored.due_date, Some(date(2024, 1, 3)));
        assert_eq!(stored.recurring_pattern, task.recurring_pattern);
        assert!(stored.is_recurring);
        assert_eq!(stored.created_at.timestamp(), task.created_at.timestamp());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_and_delete(ctx: &mut TaskTestContext) {
        let mut task = Task::new("Original", "");
        ctx.tasks.insert(&task).unwrap();

        task.name = "Renamed".to_string();
        task.status = TaskStatus::InProgress;
        ctx.tasks.update(&task).unwrap();

        let stored = ctx.tasks.get_by_id(task.id).unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.status, TaskStatus::InProgress);

        assert_eq!(ctx.tasks.delete(task.id).unwrap(), 1);
        assert!(ctx.tasks.get_by_id(task.id).unwrap().is_none());
        assert!(ctx.tasks.update(&task).is_err());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_fetch_filters(ctx: &mut TaskTestContext) {
        let plain = Task::new("Plain", "");
        let recurring = Task::new("Recurring", "").with_pattern(Some(RecurrencePattern::daily(1)));
        let mut done = Task::new("Done", "");
        done.mark_completed(Utc::now());
        ctx.tasks.insert_many(&[plain.clone(), recurring.clone(), done.clone()]).unwrap();

        assert_eq!(ctx.tasks.fetch(TaskFilter::All).unwrap().len(), 3);
        assert_eq!(ctx.tasks.fetch(TaskFilter::Open).unwrap().len(), 2);

        let repeating = ctx.tasks.fetch(TaskFilter::Recurring).unwrap();
        assert_eq!(repeating.len(), 1);
        assert_eq!(repeating[0].id, recurring.id);

        let by_ids = ctx.tasks.fetch(TaskFilter::ByIds(vec![plain.id, done.id])).unwrap();
        assert_eq!(by_ids.len(), 2);
        assert!(ctx.tasks.fetch(TaskFilter::ByIds(vec![])).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_fetch_orders_by_due_date(ctx: &mut TaskTestContext) {
        let later = Task::new("Later", "").with_due_date(date(2024, 3, 1));
        let undated = Task::new("Undated", "");
        let sooner = Task::new("Sooner", "").with_due_date(date(2024, 1, 15));
        ctx.tasks.insert_many(&[later, undated, sooner]).unwrap();

        let names: Vec<_> = ctx.tasks.fetch(TaskFilter::All).unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Sooner", "Later", "Undated"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_resolve_by_prefix(ctx: &mut TaskTestContext) {
        let task = Task::new("Find me", "");
        ctx.tasks.insert(&task).unwrap();

        assert_eq!(ctx.tasks.resolve(&task.short_id()).unwrap().id, task.id);
        assert_eq!(ctx.tasks.resolve(&task.short_id().to_uppercase()).unwrap().id, task.id);
        assert_eq!(ctx.tasks.resolve(&task.id.to_string()).unwrap().id, task.id);
        assert!(ctx.tasks.resolve("zzzz").is_err());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_resolve_rejects_ambiguous_prefix(ctx: &mut TaskTestContext) {
        let mut one = Task::new("One", "");
        one.id = Uuid::from_u128(1);
        let mut two = Task::new("Two", "");
        two.id = Uuid::from_u128(2);
        ctx.tasks.insert_many(&[one, two]).unwrap();

        let error = ctx.tasks.resolve("0000").unwrap_err();
        assert!(error.to_string().contains("matches 2 tasks"));
        let error = ctx.tasks.resolve("00000000-0000-0000-0000-00000000000").unwrap_err();
        assert!(error.to_string().contains("matches 2 tasks"));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_prefix_wildcards_match_nothing(ctx: &mut TaskTestContext) {
        let task = Task::new("Only", "");
        ctx.tasks.insert(&task).unwrap();

        for input in ["%", "_", "%%", "_%", "", "   "] {
            assert!(ctx.tasks.find_by_prefix(input).unwrap().is_empty(), "{:?} matched a task", input);
            let error = ctx.tasks.resolve(input).unwrap_err();
            assert!(error.to_string().contains("No task matches"));
        }

        let with_wildcard = format!("{}%", &task.short_id()[..4]);
        assert!(ctx.tasks.find_by_prefix(&with_wildcard).unwrap().is_empty());
        assert_eq!(ctx.tasks.find_by_prefix(&task.short_id()[..4]).unwrap().len(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_complete_schedules_next_occurrence(ctx: &mut TaskTestContext) {
        let task = Task::new("Standup", "").with_due_date(date(2024, 1, 1)).with_pattern(Some(RecurrencePattern::daily(1)));
        ctx.tasks.insert(&task).unwrap();

        let completion = ctx.tasks.complete(task.id, &ctx.engine).unwrap();
        assert!(completion.task.completed);
        assert_eq!(completion.task.status, TaskStatus::Done);

        let NextOccurrence::Scheduled(next) = completion.next else {
            panic!("expected a scheduled occurrence");
        };
        assert_eq!(next.due_date, Some(date(2024, 1, 2)));

        let open = ctx.tasks.fetch(TaskFilter::Open).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, next.id);

        let stored = ctx.tasks.get_by_id(task.id).unwrap().unwrap();
        assert!(stored.completed);
        assert!(stored.completed_at.is_some());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_complete_twice_fails(ctx: &mut TaskTestContext) {
        let task = Task::new("Once", "");
        ctx.tasks.insert(&task).unwrap();

        let completion = ctx.tasks.complete(task.id, &ctx.engine).unwrap();
        assert_eq!(completion.next, NextOccurrence::NotRecurring);
        assert!(ctx.tasks.complete(task.id, &ctx.engine).is_err());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_complete_at_end_of_series(ctx: &mut TaskTestContext) {
        let pattern = RecurrencePattern::daily(1).with_end_date(date(2024, 1, 5));
        let task = Task::new("Course", "").with_due_date(date(2024, 1, 5)).with_pattern(Some(pattern));
        ctx.tasks.insert(&task).unwrap();

        let completion = ctx.tasks.complete(task.id, &ctx.engine).unwrap();
        assert_eq!(completion.next, NextOccurrence::SeriesFinished);
        assert!(ctx.tasks.fetch(TaskFilter::Open).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_series_sharing_a_pattern_stay_independent(ctx: &mut TaskTestContext) {
        let water = Task::new("Water plants", "").with_due_date(date(2024, 1, 1)).with_pattern(Some(RecurrencePattern::daily(1)));
        let vitamins = Task::new("Take vitamins", "").with_due_date(date(2024, 1, 2)).with_pattern(Some(RecurrencePattern::daily(1)));
        ctx.tasks.insert_many(&[water.clone(), vitamins.clone()]).unwrap();

        let completion = ctx.tasks.complete(water.id, &ctx.engine).unwrap();
        let NextOccurrence::Scheduled(next) = completion.next else {
            panic!("expected a scheduled occurrence");
        };
        assert_eq!(next.name, "Water plants");
        assert_eq!(next.due_date, Some(date(2024, 1, 2)));

        let mut open: Vec<_> = ctx.tasks.fetch(TaskFilter::Open).unwrap().into_iter().map(|t| t.name).collect();
        open.sort();
        assert_eq!(open, vec!["Take vitamins", "Water plants"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_complete_skips_already_scheduled_occurrence(ctx: &mut TaskTestContext) {
        let anchor = Task::new("Standup", "").with_due_date(date(2024, 1, 1));
        ctx.tasks.insert(&anchor).unwrap();
        ctx.tasks.apply_pattern(anchor.id, Some(RecurrencePattern::daily(1)), &ctx.engine).unwrap();
        assert_eq!(ctx.tasks.fetch(TaskFilter::Open).unwrap().len(), 6);

        let completion = ctx.tasks.complete(anchor.id, &ctx.engine).unwrap();
        assert!(matches!(completion.next, NextOccurrence::AlreadyScheduled(_)));
        assert_eq!(ctx.tasks.fetch(TaskFilter::Open).unwrap().len(), 5);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_apply_pattern_replaces_series(ctx: &mut TaskTestContext) {
        let anchor = Task::new("Gym", "").with_due_date(date(2024, 1, 1));
        let unrelated = Task::new("Pay rent", "").with_pattern(Some(RecurrencePattern::daily(1)));
        ctx.tasks.insert_many(&[anchor.clone(), unrelated.clone()]).unwrap();

        let first = ctx.tasks.apply_pattern(anchor.id, Some(RecurrencePattern::daily(1)), &ctx.engine).unwrap();
        assert!(first.instance_ids_to_remove.is_empty());
        assert_eq!(first.new_instances.len(), 5);

        let second = ctx.tasks.apply_pattern(anchor.id, Some(RecurrencePattern::weekly(1)), &ctx.engine).unwrap();
        let mut removed = second.instance_ids_to_remove.clone();
        let mut expected: Vec<_> = first.new_instances.iter().map(|t| t.id).collect();
        removed.sort();
        expected.sort();
        assert_eq!(removed, expected);

        let stored_anchor = ctx.tasks.get_by_id(anchor.id).unwrap().unwrap();
        assert_eq!(stored_anchor.recurring_pattern, Some(RecurrencePattern::weekly(1)));
        assert!(ctx.tasks.get_by_id(unrelated.id).unwrap().is_some());

        let open = ctx.tasks.fetch(TaskFilter::Open).unwrap();
        assert_eq!(open.len(), 1 + 1 + 5);
        assert_eq!(open.iter().filter(|t| t.recurring_pattern == Some(RecurrencePattern::daily(1))).count(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_apply_pattern_clear_removes_series(ctx: &mut TaskTestContext) {
        let anchor = Task::new("Gym", "").with_due_date(date(2024, 1, 1));
        ctx.tasks.insert(&anchor).unwrap();
        ctx.tasks.apply_pattern(anchor.id, Some(RecurrencePattern::daily(2)), &ctx.engine).unwrap();

        let update = ctx.tasks.apply_pattern(anchor.id, None, &ctx.engine).unwrap();
        assert_eq!(update.instance_ids_to_remove.len(), 5);
        assert!(update.new_instances.is_empty());

        let open = ctx.tasks.fetch(TaskFilter::Open).unwrap();
        assert_eq!(open.len(), 1);
        assert!(!open[0].is_recurring);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_apply_pattern_rejects_invalid_pattern(ctx: &mut TaskTestContext) {
        let anchor = Task::new("Gym", "");
        ctx.tasks.insert(&anchor).unwrap();

        let result = ctx.tasks.apply_pattern(anchor.id, Some(RecurrencePattern::daily(0)), &ctx.engine);
        assert!(result.is_err());

        let stored = ctx.tasks.get_by_id(anchor.id).unwrap().unwrap();
        assert!(!stored.is_recurring);
        assert_eq!(ctx.tasks.fetch(TaskFilter::All).unwrap().len(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_many(ctx: &mut TaskTestContext) {
        let tasks: Vec<_> = (1..=4).map(|i| Task::new(&format!("Task {}", i), "")).collect();
        ctx.tasks.insert_many(&tasks).unwrap();

        let ids: Vec<_> = tasks.iter().take(3).map(|t| t.id).collect();
        assert_eq!(ctx.tasks.delete_many(&ids).unwrap(), 3);
        assert_eq!(ctx.tasks.fetch(TaskFilter::All).unwrap().len(), 1);
    }
}
