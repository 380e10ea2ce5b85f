//! Integration tests for cr-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{HeatCellRow, PersonSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(person_id: u32, tick: u64) -> PersonSnapshotRow {
        PersonSnapshotRow {
            person_id,
            tick,
            x:            person_id as i32,
            y:            7,
            reached_goal: person_id == 2,
        }
    }

    fn read_all(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("person_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("heat_map.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let headers = |name: &str| -> Vec<String> {
            let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
            rdr.headers().unwrap().iter().map(str::to_owned).collect()
        };
        assert_eq!(headers("person_snapshots.csv"), ["person_id", "tick", "x", "y", "reached_goal"]);
        assert_eq!(
            headers("tick_summaries.csv"),
            ["tick", "elapsed_ms", "active", "moved", "arrivals", "blocked"]
        );
        assert_eq!(headers("heat_map.csv"), ["x", "y", "visit_count", "shade"]);
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)]).unwrap();
        w.finish().unwrap();

        let rows = read_all(dir.path().join("person_snapshots.csv"));
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0"); // person_id
        assert_eq!(&rows[0][1], "5"); // tick
        assert_eq!(&rows[1][2], "1"); // x
        assert_eq!(&rows[2][4], "1"); // reached_goal as integer
        assert_eq!(&rows[0][4], "0");
    }

    #[test]
    fn csv_summary_and_heat_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick: 3, elapsed_ms: 600, active: 4, moved: 2, arrivals: 1, blocked: 0,
        })
        .unwrap();
        w.write_heat_map(&[HeatCellRow { x: 2, y: 9, visit_count: 5, shade: 127 }]).unwrap();
        w.finish().unwrap();

        let summaries = read_all(dir.path().join("tick_summaries.csv"));
        assert_eq!(summaries.len(), 1);
        assert_eq!(&summaries[0][1], "600");
        assert_eq!(&summaries[0][4], "1");

        let heat = read_all(dir.path().join("heat_map.csv"));
        assert_eq!(&heat[0][2], "5");
        assert_eq!(&heat[0][3], "127");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
        w.write_heat_map(&[]).unwrap();
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use cr_core::{Direction, PersonId, Point, ReplayConfig};
    use cr_grid::{Grid, Person};
    use cr_replay::{ReplayBuilder, RoutePlan};

    use crate::{
        CsvWriter, HeatCellRow, OutputError, OutputResult, OutputWriter, PersonSnapshotRow,
        ReplayOutputObserver, TickSummaryRow,
    };

    /// Person 0 walks three cells to its goal; person 1 makes one diagonal
    /// move and stops short of its goal.  Done after tick 3.
    fn scenario() -> (Grid, RoutePlan) {
        let mut grid = Grid::new(10, 10).unwrap();
        for (id, pos, goal) in [(0, (1, 1), (4, 1)), (1, (5, 5), (9, 9))] {
            let goal = Point::new(goal.0, goal.1);
            grid.insert_person(Person::new(PersonId(id), Point::new(pos.0, pos.1), goal)).unwrap();
            grid.set_goal(goal);
        }
        let routes = RoutePlan::new()
            .with(PersonId(0), vec![Direction::Right; 3])
            .with(PersonId(1), vec![Direction::RightUp]);
        (grid, routes)
    }

    #[test]
    fn integration_csv() {
        let (grid, routes) = scenario();
        let config = ReplayConfig::default();
        let mut replay = ReplayBuilder::new(grid)
            .config(config.clone())
            .routes(routes)
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = ReplayOutputObserver::new(writer, &config);
        obs.record_initial(replay.initial());
        replay.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let read = |name: &str| -> Vec<csv::StringRecord> {
            let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
            rdr.records().map(|r| r.unwrap()).collect()
        };

        // Ticks 0..=3 × 2 persons.
        let snapshots = read("person_snapshots.csv");
        assert_eq!(snapshots.len(), 8);
        let last = &snapshots[6];
        assert_eq!((&last[0], &last[1], &last[2], &last[4]), ("0", "3", "4", "1"));

        let summaries = read("tick_summaries.csv");
        let columns: Vec<(String, String, String, String)> = summaries
            .iter()
            .map(|r| (r[0].to_owned(), r[1].to_owned(), r[2].to_owned(), r[3].to_owned()))
            .collect();
        assert_eq!(
            columns,
            [
                ("1".into(), "200".into(), "2".into(), "1".into()),
                ("2".into(), "400".into(), "2".into(), "2".into()),
                ("3".into(), "600".into(), "1".into(), "1".into()),
            ]
        );

        // (2,1), (3,1), (5,5) and (6,6), one visit each.
        let heat = read("heat_map.csv");
        assert_eq!(heat.len(), 4);
        assert!(heat.iter().all(|r| &r[2] == "1" && &r[3] == "127"));
    }

    struct FailingWriter {
        calls: usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_snapshots(&mut self, _rows: &[PersonSnapshotRow]) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("disk full #{}", self.calls))))
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Ok(())
        }
        fn write_heat_map(&mut self, _rows: &[HeatCellRow]) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let (grid, routes) = scenario();
        let mut replay = ReplayBuilder::new(grid).routes(routes).build().unwrap();
        let mut obs = ReplayOutputObserver::new(FailingWriter { calls: 0 }, &replay.config);
        replay.run(&mut obs).unwrap();

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("disk full #1"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 3);
    }
}
