//! Unit tests for cr-transport.

use std::collections::HashSet;
use std::io::Cursor;

use cr_core::{Direction, PersonId, Point};

use crate::{
    export_grid, load_grid, load_grid_reader, load_routes, load_routes_reader, read_map,
    BorderDoc, MapDocument, PersonDoc, TransportError,
};

// ── Fixtures ──────────────────────────────────────────────────────────────────

const MAP_JSON: &str = r#"{
    "up_right_point":  {"x": 40, "y": 22},
    "down_left_point": {"x": 0,  "y": 0},
    "borders": [
        {"first": {"x": 4,  "y": 0}, "second": {"x": 4,  "y": 10}},
        {"first": {"x": 10, "y": 5}, "second": {"x": 2,  "y": 5}}
    ],
    "persons": [
        {"id": 0, "position": {"x": 15, "y": 15}, "goal": {"x": 18, "y": 15}},
        {"id": 1, "position": {"x": 1,  "y": 1},  "goal": {"x": 18, "y": 15}},
        {"id": 2, "position": {"x": 30, "y": 2},  "goal": {"x": 39, "y": 21}}
    ],
    "name": "lobby"
}"#;

const STATS_JSON: &str = r#"{
    "ideal":  {"value": 12.5, "problematic": 0},
    "valid":  {"value": null, "problematic": 2},
    "routes": [
        {"id": 0, "route": ["RIGHT", "RIGHT", "RIGHT"]},
        {"id": 2, "route": ["RIGHT_UP", "WAIT", "LEFT_DOWN"]},
        {"id": 1, "route": []}
    ]
}"#;

fn map_doc() -> MapDocument {
    read_map(MAP_JSON.as_bytes()).unwrap()
}

// ── load_grid ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod load_tests {
    use super::*;

    #[test]
    fn builds_walls_persons_and_goals() {
        let grid = load_grid(&map_doc()).unwrap();
        assert_eq!((grid.width(), grid.height()), (40, 22));
        assert_eq!(grid.walls().len(), 2);
        assert!(grid.get_cell(4, 9).unwrap().is_wall);
        assert!(grid.get_cell(2, 5).unwrap().is_wall);
        assert!(!grid.get_cell(10, 5).unwrap().is_wall);

        assert_eq!(grid.person_count(), 3);
        assert_eq!(grid.person(PersonId(2)).unwrap().position, Point::new(30, 2));
        assert!(grid.has_goal(Point::new(18, 15)));
        assert!(grid.has_goal(Point::new(39, 21)));
        assert_eq!(grid.goals().count(), 2);
    }

    #[test]
    fn reader_variant_matches() {
        let a = load_grid(&map_doc()).unwrap();
        let b = load_grid_reader(Cursor::new(MAP_JSON)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn optional_fields_default() {
        let doc = read_map(
            r#"{"up_right_point": {"x": 3, "y": 3}, "down_left_point": {"x": 0, "y": 0},
                "borders": [], "persons": []}"#
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(doc.name, None);
        assert!(doc.groups.is_empty());
        assert_eq!(load_grid(&doc).unwrap().person_count(), 0);
    }

    #[test]
    fn groups_are_registered() {
        let mut doc = map_doc();
        doc.groups = vec![crate::GroupDoc {
            id:             cr_core::GroupId(4),
            start_position: Point::new(1, 1),
            total_count:    1,
            person_ids:     vec![PersonId(1)],
        }];
        let grid = load_grid(&doc).unwrap();
        let group = grid.group_at(Point::new(1, 1)).unwrap();
        assert_eq!(group.member_ids, vec![PersonId(1)]);
        assert_eq!(group.member_count, 1);
        assert_eq!(export_grid(&grid).groups, doc.groups);
    }

    #[test]
    fn group_with_unknown_member_is_malformed() {
        let mut doc = map_doc();
        doc.groups = vec![crate::GroupDoc {
            id:             cr_core::GroupId(4),
            start_position: Point::new(1, 1),
            total_count:    2,
            person_ids:     vec![PersonId(1), PersonId(77)],
        }];
        assert!(matches!(load_grid(&doc), Err(TransportError::MalformedDocument(_))));
    }

    #[test]
    fn group_count_mismatch_is_malformed() {
        let mut doc = map_doc();
        doc.groups = vec![crate::GroupDoc {
            id:             cr_core::GroupId(4),
            start_position: Point::new(1, 1),
            total_count:    3,
            person_ids:     vec![PersonId(1)],
        }];
        assert!(matches!(load_grid(&doc), Err(TransportError::MalformedDocument(_))));
    }

    #[test]
    fn non_origin_corner_is_malformed() {
        let mut doc = map_doc();
        doc.down_left_point = Point::new(1, 0);
        assert!(matches!(load_grid(&doc), Err(TransportError::MalformedDocument(_))));
    }

    #[test]
    fn empty_extent_is_malformed() {
        let mut doc = map_doc();
        doc.up_right_point = Point::new(0, 22);
        assert!(matches!(load_grid(&doc), Err(TransportError::MalformedDocument(_))));
    }

    #[test]
    fn diagonal_border_is_malformed() {
        let mut doc = map_doc();
        doc.borders.push(BorderDoc { first: Point::new(5, 5), second: Point::new(7, 6) });
        let err = load_grid(&doc).unwrap_err();
        assert!(matches!(err, TransportError::MalformedDocument(ref m) if m.contains("border 2")));
    }

    #[test]
    fn border_past_the_edge_is_malformed() {
        let mut doc = map_doc();
        doc.borders.push(BorderDoc { first: Point::new(0, 0), second: Point::new(41, 0) });
        assert!(matches!(load_grid(&doc), Err(TransportError::MalformedDocument(_))));
    }

    #[test]
    fn repeated_border_is_tolerated() {
        let mut doc = map_doc();
        let first = doc.borders[0];
        doc.borders.push(BorderDoc { first: first.second, second: first.first });
        assert_eq!(load_grid(&doc).unwrap().walls().len(), 2);
    }

    #[test]
    fn duplicate_person_is_malformed() {
        let mut doc = map_doc();
        doc.persons.push(PersonDoc {
            id:       PersonId(1),
            position: Point::new(2, 2),
            goal:     Point::new(3, 3),
        });
        assert!(matches!(load_grid(&doc), Err(TransportError::MalformedDocument(_))));
    }

    #[test]
    fn person_outside_is_malformed() {
        let mut doc = map_doc();
        doc.persons[0].position = Point::new(40, 0);
        assert!(matches!(load_grid(&doc), Err(TransportError::MalformedDocument(_))));

        let mut doc = map_doc();
        doc.persons[0].goal = Point::new(0, 22);
        assert!(matches!(load_grid(&doc), Err(TransportError::MalformedDocument(_))));
    }

    #[test]
    fn missing_field_is_json_error() {
        let err = read_map(r#"{"up_right_point": {"x": 3, "y": 3}}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }
}

// ── export_grid ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod export_tests {
    use super::*;

    fn border_set(doc: &MapDocument) -> HashSet<(Point, Point)> {
        doc.borders
            .iter()
            .map(|b| if b.first <= b.second { (b.first, b.second) } else { (b.second, b.first) })
            .collect()
    }

    fn person_set(doc: &MapDocument) -> HashSet<PersonDoc> {
        doc.persons.iter().cloned().collect()
    }

    #[test]
    fn round_trip_preserves_walls_and_persons() {
        let doc = map_doc();
        let exported = export_grid(&load_grid(&doc).unwrap());
        assert_eq!(exported.up_right_point, doc.up_right_point);
        assert_eq!(exported.down_left_point, Point::ORIGIN);
        assert_eq!(border_set(&exported), border_set(&doc));
        assert_eq!(person_set(&exported), person_set(&doc));
        assert_eq!(exported.name.as_deref(), Some("lobby"));
    }

    #[test]
    fn round_trip_survives_json() {
        let exported = export_grid(&load_grid(&map_doc()).unwrap());
        let mut buf = Vec::new();
        crate::write_map(&exported, &mut buf).unwrap();
        let reread = read_map(buf.as_slice()).unwrap();
        assert_eq!(reread, exported);
        assert_eq!(export_grid(&load_grid(&reread).unwrap()), exported);
    }

    #[test]
    fn orphan_goal_is_not_exported() {
        let mut grid = load_grid(&map_doc()).unwrap();
        grid.set_goal(Point::new(7, 7));
        let exported = export_grid(&grid);
        let reloaded = load_grid(&exported).unwrap();
        assert!(!reloaded.has_goal(Point::new(7, 7)));
        assert_eq!(reloaded.goals().count(), 2);
    }

    #[test]
    fn groups_are_exported() {
        let mut grid = load_grid(&map_doc()).unwrap();
        grid.place_group(Point::new(5, 15), 2, Point::new(8, 15)).unwrap();
        let exported = export_grid(&grid);
        assert_eq!(exported.groups.len(), 1);
        assert_eq!(exported.groups[0].person_ids, vec![PersonId(3), PersonId(4)]);
        assert_eq!(exported.groups[0].total_count, 2);
        assert_eq!(exported.persons.len(), 5);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        let exported = export_grid(&load_grid(&map_doc()).unwrap());
        crate::write_map_path(&exported, &path).unwrap();
        assert_eq!(crate::read_map_path(&path).unwrap(), exported);
    }
}

// ── load_routes ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod route_tests {
    use super::*;
    use Direction::*;

    #[test]
    fn decodes_tokens_and_estimates() {
        let (plan, stats) = load_routes_reader(STATS_JSON.as_bytes()).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.get(PersonId(0)), &[Right, Right, Right]);
        assert_eq!(plan.get(PersonId(2)), &[RightUp, Wait, LeftDown]);
        assert!(plan.get(PersonId(1)).is_empty());
        assert!(plan.contains(PersonId(1)));

        assert_eq!(stats.ideal.value, Some(12.5));
        assert_eq!(stats.valid.value, None);
        assert_eq!(stats.valid.problematic, 2);
    }

    #[test]
    fn unknown_token_names_person() {
        let json = r#"{"ideal": {"value": 1, "problematic": 0},
                       "valid": {"value": 1, "problematic": 0},
                       "routes": [{"id": 5, "route": ["UP", "NORTH_EAST"]}]}"#;
        match load_routes_reader(json.as_bytes()) {
            Err(TransportError::UnsupportedDirection { person, token }) => {
                assert_eq!(person, PersonId(5));
                assert_eq!(token, "NORTH_EAST");
            }
            other => panic!("expected UnsupportedDirection, got {other:?}"),
        }
    }

    #[test]
    fn lowercase_token_rejected() {
        let json = r#"{"ideal": {"value": null, "problematic": 0},
                       "valid": {"value": null, "problematic": 0},
                       "routes": [{"id": 0, "route": ["right"]}]}"#;
        assert!(matches!(
            load_routes_reader(json.as_bytes()),
            Err(TransportError::UnsupportedDirection { .. })
        ));
    }

    #[test]
    fn second_route_for_person_is_malformed() {
        let mut doc = crate::read_statistics(STATS_JSON.as_bytes()).unwrap();
        doc.routes.push(crate::RouteDoc { id: PersonId(0), route: vec!["UP".into()] });
        assert!(matches!(load_routes(&doc), Err(TransportError::MalformedDocument(_))));
    }

    #[test]
    fn loaded_documents_replay() {
        use cr_replay::{NoopObserver, ReplayBuilder};

        let grid = load_grid(&map_doc()).unwrap();
        let (plan, _) = load_routes_reader(STATS_JSON.as_bytes()).unwrap();
        let mut replay = ReplayBuilder::new(grid).routes(plan).build().unwrap();
        replay.run(&mut NoopObserver).unwrap();
        let end = replay.current();
        assert!(end.person(PersonId(0)).unwrap().reached_goal);
        assert_eq!(end.person(PersonId(2)).unwrap().position, Point::new(30, 2));
    }
}
