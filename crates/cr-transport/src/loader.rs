//! Document ⇄ `Grid` conversion, route decoding and file/reader helpers.
//!
//! # Lossy goals
//!
//! A grid stores goals as a per-cell flag, not per person.  On export every
//! person carries its own goal point, so persons sharing a goal cell all
//! export that point, while goal flags with no owning person (placed with
//! `Grid::set_goal` alone) are not exported.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use cr_core::{Direction, Point, WallSegment};
use cr_grid::{Grid, Group, Person};
use cr_replay::RoutePlan;

use crate::document::{BorderDoc, GroupDoc, MapDocument, PersonDoc, Statistics, StatisticsDocument};
use crate::{TransportError, TransportResult};

fn malformed(msg: impl Into<String>) -> TransportError {
    TransportError::MalformedDocument(msg.into())
}

// ── Map → Grid ────────────────────────────────────────────────────────────────

/// Build a grid from a decoded map document.
///
/// Walls are rasterized in document order (repeated borders are tolerated),
/// then persons are placed and their goals marked, then groups registered.
///
/// # Errors
///
/// [`TransportError::MalformedDocument`] for a non-origin `down_left_point`,
/// non-positive extent, diagonal or out-of-range borders, persons or goals
/// outside the grid, duplicate person ids, or a group that is unplaceable,
/// whose `total_count` differs from its `person_ids`, or that names a person
/// missing from the map.
pub fn load_grid(doc: &MapDocument) -> TransportResult<Grid> {
    if doc.down_left_point != Point::ORIGIN {
        return Err(malformed(format!(
            "down_left_point must be (0, 0), got {}",
            doc.down_left_point
        )));
    }
    let Point { x: width, y: height } = doc.up_right_point;
    if width <= 0 || height <= 0 {
        return Err(malformed(format!("grid extent {width}x{height} must be positive")));
    }
    let mut grid = Grid::new(width, height)?;
    grid.set_name(doc.name.clone());

    for (i, border) in doc.borders.iter().enumerate() {
        let segment = WallSegment::new(border.first, border.second)
            .map_err(|e| malformed(format!("border {i}: {e}")))?;
        let added = grid
            .add_wall(segment)
            .map_err(|e| malformed(format!("border {i}: {e}")))?;
        if !added {
            debug!(index = i, %segment, "repeated border skipped");
        }
    }

    for person in &doc.persons {
        if !grid.contains(person.goal) {
            return Err(malformed(format!(
                "goal {} of {} is outside the grid",
                person.goal, person.id
            )));
        }
        grid.insert_person(Person::new(person.id, person.position, person.goal))
            .map_err(|e| malformed(format!("person {}: {e}", person.id)))?;
        grid.set_goal(person.goal);
    }

    for group in &doc.groups {
        if group.person_ids.len() != group.total_count as usize {
            return Err(malformed(format!(
                "group {} lists {} members but total_count is {}",
                group.id,
                group.person_ids.len(),
                group.total_count
            )));
        }
        if let Some(missing) = group.person_ids.iter().find(|id| grid.person(**id).is_none()) {
            return Err(malformed(format!(
                "group {} names {missing}, which is not on the map",
                group.id
            )));
        }
        let accepted = grid.add_group(Group {
            id:           group.id,
            anchor:       group.start_position,
            member_count: group.total_count,
            member_ids:   group.person_ids.clone(),
        });
        if !accepted {
            return Err(malformed(format!(
                "group {} at {} is duplicated or outside the grid",
                group.id, group.start_position
            )));
        }
    }

    info!(
        width,
        height,
        walls   = grid.walls().len(),
        persons = grid.person_count(),
        groups  = grid.groups().len(),
        "map loaded"
    );
    Ok(grid)
}

// ── Grid → Map ────────────────────────────────────────────────────────────────

/// Export a grid as a map document.  See the module docs for how goals are
/// handled.
pub fn export_grid(grid: &Grid) -> MapDocument {
    let doc = MapDocument {
        up_right_point:  Point::new(grid.width(), grid.height()),
        down_left_point: Point::ORIGIN,
        borders: grid
            .walls()
            .iter()
            .map(|w| BorderDoc { first: w.first(), second: w.second() })
            .collect(),
        persons: grid
            .persons()
            .map(|p| PersonDoc { id: p.id, position: p.position, goal: p.goal })
            .collect(),
        name: grid.name().map(str::to_owned),
        groups: grid
            .groups()
            .iter()
            .map(|g| GroupDoc {
                id:             g.id,
                start_position: g.anchor,
                total_count:    g.member_count,
                person_ids:     g.member_ids.clone(),
            })
            .collect(),
    };
    info!(
        walls   = doc.borders.len(),
        persons = doc.persons.len(),
        groups  = doc.groups.len(),
        "map exported"
    );
    doc
}

// ── Statistics → RoutePlan ────────────────────────────────────────────────────

/// Decode the routes of a statistics document and keep its estimates.
///
/// Every token is parsed here; the replay never sees a string.
///
/// # Errors
///
/// - [`TransportError::UnsupportedDirection`] for a token outside the move
///   vocabulary.
/// - [`TransportError::MalformedDocument`] if a person has two routes.
pub fn load_routes(doc: &StatisticsDocument) -> TransportResult<(RoutePlan, Statistics)> {
    let mut plan = RoutePlan::new();
    for entry in &doc.routes {
        let route = entry
            .route
            .iter()
            .map(|token| {
                Direction::from_str(token).map_err(|_| TransportError::UnsupportedDirection {
                    person: entry.id,
                    token:  token.clone(),
                })
            })
            .collect::<TransportResult<Vec<Direction>>>()?;
        if plan.insert(entry.id, route).is_some() {
            return Err(malformed(format!("{} has more than one route", entry.id)));
        }
    }
    debug!(routes = plan.len(), longest = plan.longest_cost(), "routes decoded");
    Ok((plan, Statistics { ideal: doc.ideal, valid: doc.valid }))
}

// ── Readers & files ───────────────────────────────────────────────────────────

/// Parse a map document from any `Read` source.
pub fn read_map<R: Read>(reader: R) -> TransportResult<MapDocument> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse a map document from a JSON file.
pub fn read_map_path(path: &Path) -> TransportResult<MapDocument> {
    read_map(BufReader::new(File::open(path)?))
}

/// Parse a statistics document from any `Read` source.
pub fn read_statistics<R: Read>(reader: R) -> TransportResult<StatisticsDocument> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse a statistics document from a JSON file.
pub fn read_statistics_path(path: &Path) -> TransportResult<StatisticsDocument> {
    read_statistics(BufReader::new(File::open(path)?))
}

/// [`read_map`] then [`load_grid`].
pub fn load_grid_reader<R: Read>(reader: R) -> TransportResult<Grid> {
    load_grid(&read_map(reader)?)
}

/// [`read_statistics`] then [`load_routes`].
pub fn load_routes_reader<R: Read>(reader: R) -> TransportResult<(RoutePlan, Statistics)> {
    load_routes(&read_statistics(reader)?)
}

/// Serialize a map document as pretty-printed JSON.
pub fn write_map<W: Write>(doc: &MapDocument, writer: W) -> TransportResult<()> {
    serde_json::to_writer_pretty(writer, doc)?;
    Ok(())
}

/// Write a map document to `path`, replacing any existing file.
pub fn write_map_path(doc: &MapDocument, path: &Path) -> TransportResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_map(doc, &mut writer)?;
    writer.flush()?;
    Ok(())
}
