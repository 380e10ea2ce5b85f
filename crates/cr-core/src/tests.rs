//! Unit tests for cr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{GroupId, PersonId};

    #[test]
    fn ordering_and_next() {
        assert!(PersonId(0) < PersonId(1));
        assert_eq!(PersonId(7).next(), PersonId(8));
        assert_eq!(GroupId::from(3), GroupId(3));
    }

    #[test]
    fn display() {
        assert_eq!(PersonId(7).to_string(), "PersonId(7)");
    }
}

#[cfg(test)]
mod geometry {
    use crate::{CoreError, Orientation, Point, WallSegment};

    #[test]
    fn vertical_and_horizontal_accepted() {
        let v = WallSegment::new(Point::new(3, 1), Point::new(3, 4)).unwrap();
        assert_eq!(v.orientation(), Orientation::Vertical);
        assert_eq!(v.len(), 3);

        let h = WallSegment::new(Point::new(5, 2), Point::new(1, 2)).unwrap();
        assert_eq!(h.orientation(), Orientation::Horizontal);
        assert_eq!(h.len(), 4);
    }

    #[test]
    fn diagonal_rejected() {
        let err = WallSegment::new(Point::new(5, 5), Point::new(7, 6)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidGeometry { .. }));
    }

    #[test]
    fn zero_length_rejected() {
        assert!(WallSegment::new(Point::new(2, 2), Point::new(2, 2)).is_err());
    }

    #[test]
    fn cells_exclude_far_endpoint() {
        let v = WallSegment::new(Point::new(3, 4), Point::new(3, 1)).unwrap();
        let cells: Vec<_> = v.cells().collect();
        assert_eq!(cells, vec![Point::new(3, 1), Point::new(3, 2), Point::new(3, 3)]);

        let h = WallSegment::new(Point::new(0, 2), Point::new(2, 2)).unwrap();
        let cells: Vec<_> = h.cells().collect();
        assert_eq!(cells, vec![Point::new(0, 2), Point::new(1, 2)]);
    }

    #[test]
    fn same_endpoints_ignores_order() {
        let a = WallSegment::new(Point::new(1, 1), Point::new(1, 5)).unwrap();
        let b = WallSegment::new(Point::new(1, 5), Point::new(1, 1)).unwrap();
        let c = WallSegment::new(Point::new(1, 1), Point::new(1, 4)).unwrap();
        assert!(a.same_endpoints(&b));
        assert!(!a.same_endpoints(&c));
    }

    #[test]
    fn point_within() {
        assert!(Point::new(0, 0).within(2, 2));
        assert!(!Point::new(2, 0).within(2, 2));
        assert!(!Point::new(0, -1).within(2, 2));
        assert_eq!(Point::new(1, 1).offset((1, -1)), Point::new(2, 0));
    }
}

#[cfg(test)]
mod direction {
    use crate::{CoreError, Direction};

    #[test]
    fn costs() {
        assert_eq!(Direction::Wait.tick_cost(), 1);
        assert_eq!(Direction::Right.tick_cost(), 1);
        assert_eq!(Direction::RightUp.tick_cost(), 2);
        assert_eq!(Direction::LeftDown.tick_cost(), 2);
    }

    #[test]
    fn deltas() {
        assert_eq!(Direction::Up.delta(), (0, 1));
        assert_eq!(Direction::Down.delta(), (0, -1));
        assert_eq!(Direction::LeftUp.delta(), (-1, 1));
        assert_eq!(Direction::RightDown.delta(), (1, -1));
        assert_eq!(Direction::Wait.delta(), (0, 0));
    }

    #[test]
    fn parse_every_token() {
        for d in Direction::ALL {
            assert_eq!(d.as_str().parse::<Direction>().unwrap(), d);
        }
    }

    #[test]
    fn unknown_token_rejected() {
        let err = "NORTH".parse::<Direction>().unwrap_err();
        assert_eq!(err, CoreError::UnsupportedDirection("NORTH".into()));
        assert!("right".parse::<Direction>().is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::{CursorTiming, ReplayConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick::ZERO + 1, Tick(1));
        assert_eq!((t + 1).to_string(), "T11");
    }

    #[test]
    fn clock_elapsed() {
        let config = ReplayConfig::default();
        let mut clock = config.make_clock();
        assert_eq!(clock.elapsed_ms(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.elapsed_ms(), 400);
        clock.reset();
        assert_eq!(clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn default_config() {
        let config = ReplayConfig::default();
        assert_eq!(config.tick_interval_ms, 200);
        assert_eq!(config.timing, CursorTiming::Exact);
        assert!(config.max_ticks.is_none());
    }
}

#[cfg(test)]
mod rng {
    use crate::ScenarioRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = ScenarioRng::new(7);
        let mut b = ScenarioRng::new(7);
        let mut xs: Vec<i32> = (0..16).collect();
        let mut ys = xs.clone();
        a.shuffle(&mut xs);
        b.shuffle(&mut ys);
        assert_eq!(xs, ys);

        let mut ca = a.child(3);
        let mut cb = b.child(3);
        let pool: Vec<i32> = (0..100).collect();
        assert_eq!(ca.choose(&pool), cb.choose(&pool));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = ScenarioRng::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
