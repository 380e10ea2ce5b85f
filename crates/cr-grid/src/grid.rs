//! The `Grid` — cells, wall registry, person arena and groups.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use cr_core::{CoreError, GroupId, PersonId, Point, WallSegment};

use crate::{Cell, GridError, GridResult, Group, OccupancyIndex, Person};

/// A `width × height` occupancy grid.
///
/// Cells are stored row-major (`index = y * width + x`) with `y = 0` at the
/// bottom row.  Dimensions are fixed after construction; use
/// [`Grid::resized`] to obtain a grid of another size.
///
/// `Clone` is a deep copy: the clone shares no mutable state with the
/// original, so it is the unit of snapshot used by the replay scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width:  i32,
    height: i32,
    cells:  Vec<Cell>,

    /// Display name of the map, carried through load and export.
    name: Option<String>,

    /// Every wall added, in insertion order, for serialization.
    walls: Vec<WallSegment>,

    /// Person arena.  The only place persons are stored.
    persons: BTreeMap<PersonId, Person>,

    groups: Vec<Group>,

    /// Current heat-map tick, advanced by [`Grid::add_tick`].
    heat_tick: u64,

    /// Maximum `visit_count` over all cells.
    max_ticks: u32,

    /// Next arrival stamp handed to a person entering a cell.
    next_arrival: u64,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidDimensions`] if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> GridResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells:        vec![Cell::default(); width as usize * height as usize],
            name:         None,
            walls:        Vec::new(),
            persons:      BTreeMap::new(),
            groups:       Vec::new(),
            heat_tick:    0,
            max_ticks:    0,
            next_arrival: 0,
        })
    }

    // ── Dimensions & cell lookup ──────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// `true` if `point` is a cell of this grid.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.within(self.width, self.height)
    }

    /// `true` if `point` is a grid-line intersection of this grid,
    /// `[0, width] × [0, height]`.
    #[inline]
    pub fn contains_corner(&self, point: Point) -> bool {
        point.within(self.width + 1, self.height + 1)
    }

    #[inline]
    fn index(&self, point: Point) -> Option<usize> {
        self.contains(point)
            .then(|| point.y as usize * self.width as usize + point.x as usize)
    }

    /// Bounds-checked lookup; `None` outside `[0, width) × [0, height)`.
    #[inline]
    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cell(Point::new(x, y))
    }

    #[inline]
    pub fn cell(&self, point: Point) -> Option<&Cell> {
        self.index(point).map(|i| &self.cells[i])
    }

    #[inline]
    fn cell_mut(&mut self, point: Point) -> Option<&mut Cell> {
        self.index(point).map(|i| &mut self.cells[i])
    }

    /// Every cell with its coordinate, row by row from `y = 0`.
    pub fn cells(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Point::new((i % width) as i32, (i / width) as i32), cell))
    }

    // ── Walls ─────────────────────────────────────────────────────────────

    /// Rasterize `segment` onto the cells it covers and record it in the
    /// wall registry.
    ///
    /// Returns `Ok(false)` without changes if a wall with the same endpoints
    /// is already registered.
    ///
    /// # Errors
    ///
    /// [`CoreError::OutOfBounds`] if an endpoint is not a corner of this grid.
    pub fn add_wall(&mut self, segment: WallSegment) -> GridResult<bool> {
        for corner in [segment.first(), segment.second()] {
            if !self.contains_corner(corner) {
                return Err(CoreError::OutOfBounds { point: corner }.into());
            }
        }
        if self.walls.iter().any(|w| w.same_endpoints(&segment)) {
            debug!(%segment, "wall already registered");
            return Ok(false);
        }
        self.rasterize(&segment);
        self.walls.push(segment);
        Ok(true)
    }

    /// Validate two corners as an axis-aligned segment, then [`add_wall`](Self::add_wall).
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidGeometry`] for diagonal or zero-length input, plus
    /// the errors of `add_wall`.
    pub fn add_wall_between(&mut self, first: Point, second: Point) -> GridResult<WallSegment> {
        let segment = WallSegment::new(first, second)?;
        self.add_wall(segment)?;
        Ok(segment)
    }

    /// Remove the registered wall joining the same corners as `segment`.
    ///
    /// Remaining walls are re-rasterized so a cell stays a wall exactly when
    /// some other segment still covers it.  Returns `false` if no such wall
    /// exists.
    pub fn remove_wall(&mut self, segment: &WallSegment) -> bool {
        let before = self.walls.len();
        self.walls.retain(|w| !w.same_endpoints(segment));
        if self.walls.len() == before {
            return false;
        }
        self.rebuild_walls();
        true
    }

    #[inline]
    pub fn walls(&self) -> &[WallSegment] {
        &self.walls
    }

    fn rasterize(&mut self, segment: &WallSegment) {
        let orientation = segment.orientation();
        for point in segment.cells() {
            if let Some(cell) = self.cell_mut(point) {
                cell.tag_wall(orientation);
            }
        }
    }

    fn rebuild_walls(&mut self) {
        for cell in &mut self.cells {
            cell.clear_walls();
        }
        let walls = std::mem::take(&mut self.walls);
        for wall in &walls {
            self.rasterize(wall);
        }
        self.walls = walls;
    }

    // ── Persons ───────────────────────────────────────────────────────────

    /// Place `person` into the arena at `person.position`.
    ///
    /// # Errors
    ///
    /// [`CoreError::OutOfBounds`] if the position is outside the grid,
    /// [`GridError::DuplicatePerson`] if the id is already taken.
    pub fn insert_person(&mut self, mut person: Person) -> GridResult<()> {
        if !self.contains(person.position) {
            return Err(CoreError::OutOfBounds { point: person.position }.into());
        }
        if self.persons.contains_key(&person.id) {
            return Err(GridError::DuplicatePerson(person.id));
        }
        person.arrival = self.stamp();
        self.persons.insert(person.id, person);
        Ok(())
    }

    /// Lenient [`insert_person`](Self::insert_person): logs and returns
    /// `false` instead of failing; callers validate first.
    pub fn add_person(&mut self, person: Person) -> bool {
        let id = person.id;
        match self.insert_person(person) {
            Ok(()) => true,
            Err(e) => {
                warn!(%id, error = %e, "person ignored");
                false
            }
        }
    }

    #[inline]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    /// All persons in ascending id order.
    pub fn persons(&self) -> impl Iterator<Item = &Person> + '_ {
        self.persons.values()
    }

    #[inline]
    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// Smallest id greater than every id in use.
    pub fn next_person_id(&self) -> PersonId {
        self.persons
            .keys()
            .next_back()
            .map_or(PersonId(0), |id| id.next())
    }

    /// Move a person to `to`, stamping a new arrival if the cell changes.
    ///
    /// Returns `false` if the person is unknown or `to` is outside the grid.
    pub fn relocate_person(&mut self, id: PersonId, to: Point) -> bool {
        if !self.contains(to) {
            return false;
        }
        let stamp = self.next_arrival;
        let Some(person) = self.persons.get_mut(&id) else {
            return false;
        };
        if person.position != to {
            person.position = to;
            person.arrival = stamp;
            self.next_arrival += 1;
        }
        true
    }

    /// Flag `id` as arrived and clear the goal mark on its goal cell.
    ///
    /// Returns `false` if the person is unknown.
    pub fn mark_goal_reached(&mut self, id: PersonId) -> bool {
        let Some(person) = self.persons.get_mut(&id) else {
            return false;
        };
        person.reached_goal = true;
        let goal = person.goal;
        self.remove_goal(goal);
        true
    }

    /// Remove a person from the arena and from its group's member list.
    pub fn remove_person(&mut self, id: PersonId) -> Option<Person> {
        let person = self.persons.remove(&id)?;
        for group in &mut self.groups {
            if let Some(pos) = group.member_ids.iter().position(|&m| m == id) {
                group.member_ids.remove(pos);
                group.member_count = group.member_ids.len() as u32;
            }
        }
        Some(person)
    }

    /// Remove the primary occupant of `point`, if any.
    pub fn remove_person_at(&mut self, point: Point) -> Option<Person> {
        let id = self.primary_occupant(point)?.id;
        self.remove_person(id)
    }

    /// Persons standing on `point`, in arrival order.
    pub fn occupants(&self, point: Point) -> Vec<&Person> {
        let mut here: Vec<&Person> = self.persons.values().filter(|p| p.position == point).collect();
        here.sort_by_key(|p| p.arrival);
        here
    }

    /// The earliest-arrived occupant of `point`, the one a renderer shows.
    pub fn primary_occupant(&self, point: Point) -> Option<&Person> {
        self.persons
            .values()
            .filter(|p| p.position == point)
            .min_by_key(|p| p.arrival)
    }

    pub fn is_occupied(&self, point: Point) -> bool {
        self.persons.values().any(|p| p.position == point)
    }

    /// Build the cell → occupants index for the current state.
    pub fn occupancy(&self) -> OccupancyIndex {
        OccupancyIndex::build(self)
    }

    // ── Goals ─────────────────────────────────────────────────────────────

    /// Mark a goal on `point`.  Several goals may coexist on one grid.
    /// Returns `false` if `point` is outside the grid.
    pub fn set_goal(&mut self, point: Point) -> bool {
        match self.cell_mut(point) {
            Some(cell) => {
                cell.goal = true;
                true
            }
            None => false,
        }
    }

    /// Clear the goal mark on `point`.  Returns `false` if none was set.
    pub fn remove_goal(&mut self, point: Point) -> bool {
        match self.cell_mut(point) {
            Some(cell) if cell.goal => {
                cell.goal = false;
                true
            }
            _ => false,
        }
    }

    pub fn has_goal(&self, point: Point) -> bool {
        self.cell(point).is_some_and(|c| c.goal)
    }

    /// Points currently carrying a goal mark.
    pub fn goals(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells().filter(|(_, c)| c.goal).map(|(p, _)| p)
    }

    // ── Groups ────────────────────────────────────────────────────────────

    /// Create `count` persons at `anchor`, all heading for `goal`, and
    /// register them as one group.
    ///
    /// # Errors
    ///
    /// [`CoreError::OutOfBounds`] if `anchor` is outside the grid.
    pub fn place_group(&mut self, anchor: Point, count: u32, goal: Point) -> GridResult<GroupId> {
        if !self.contains(anchor) {
            return Err(CoreError::OutOfBounds { point: anchor }.into());
        }
        let id = self.next_group_id();
        let mut next = self.next_person_id();
        let mut member_ids = Vec::with_capacity(count as usize);
        for _ in 0..count {
            self.add_person(Person::new(next, anchor, goal));
            member_ids.push(next);
            next = next.next();
        }
        self.set_goal(goal);
        self.groups.push(Group { id, anchor, member_count: count, member_ids });
        Ok(id)
    }

    /// Register an existing group without creating persons (load path).
    ///
    /// Returns `false` if the id is taken or the anchor is outside the grid.
    pub fn add_group(&mut self, group: Group) -> bool {
        if !self.contains(group.anchor) || self.groups.iter().any(|g| g.id == group.id) {
            warn!(id = %group.id, anchor = %group.anchor, "group rejected");
            return false;
        }
        self.groups.push(group);
        true
    }

    pub fn group_at(&self, point: Point) -> Option<&Group> {
        self.groups.iter().find(|g| g.anchor == point)
    }

    #[inline]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn next_group_id(&self) -> GroupId {
        self.groups
            .iter()
            .map(|g| g.id)
            .max()
            .map_or(GroupId(0), |id| id.next())
    }

    /// Remove the group anchored at `point` together with all its members.
    pub fn remove_group_at(&mut self, point: Point) -> Option<Group> {
        let pos = self.groups.iter().position(|g| g.anchor == point)?;
        let group = self.groups.remove(pos);
        for id in &group.member_ids {
            self.persons.remove(id);
        }
        Some(group)
    }

    // ── Heat map ──────────────────────────────────────────────────────────

    /// Open a new heat tick.  Call exactly once per replay step; each cell
    /// accrues at most one visit per heat tick.
    pub fn add_tick(&mut self) {
        self.heat_tick += 1;
    }

    #[inline]
    pub fn heat_tick(&self) -> u64 {
        self.heat_tick
    }

    /// Count a visit to `point` for the current heat tick.
    ///
    /// Returns `true` if the counter was incremented.
    pub fn mark_cell(&mut self, point: Point) -> bool {
        let tick = self.heat_tick;
        let Some(cell) = self.cell_mut(point) else {
            return false;
        };
        if !cell.mark(tick) {
            return false;
        }
        let visits = cell.visit_count;
        self.max_ticks = self.max_ticks.max(visits);
        true
    }

    /// Maximum visit count over all cells; the heat-map scale.
    #[inline]
    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    /// Zero every visit counter, as on replay restart.
    pub fn reset_heat(&mut self) {
        for cell in &mut self.cells {
            cell.reset_heat();
        }
        self.max_ticks = 0;
        self.heat_tick = 0;
    }

    // ── Resize ────────────────────────────────────────────────────────────

    /// A `width × height` grid carrying the name and every wall, person, goal
    /// and group that still fits.  Heat is not carried over.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidDimensions`] for non-positive dimensions.
    pub fn resized(&self, width: i32, height: i32) -> GridResult<Grid> {
        let mut grid = Grid::new(width, height)?;
        grid.name = self.name.clone();

        for wall in &self.walls {
            if grid.contains_corner(wall.first()) && grid.contains_corner(wall.second()) {
                grid.add_wall(*wall)?;
            }
        }
        for person in self.persons.values() {
            if !grid.contains(person.position) {
                continue;
            }
            let mut copy = Person::new(person.id, person.position, person.goal);
            copy.reached_goal = person.reached_goal;
            grid.add_person(copy);
        }
        for goal in self.goals() {
            grid.set_goal(goal);
        }
        for group in &self.groups {
            if !grid.contains(group.anchor) {
                continue;
            }
            let mut kept = group.clone();
            kept.member_ids.retain(|id| grid.persons.contains_key(id));
            kept.member_count = kept.member_ids.len() as u32;
            grid.add_group(kept);
        }

        debug!(
            from = %format!("{}x{}", self.width, self.height),
            to = %format!("{width}x{height}"),
            persons = grid.person_count(),
            walls = grid.walls.len(),
            "grid resized"
        );
        Ok(grid)
    }

    // ── Internal ──────────────────────────────────────────────────────────

    fn stamp(&mut self) -> u64 {
        let stamp = self.next_arrival;
        self.next_arrival += 1;
        stamp
    }
}
