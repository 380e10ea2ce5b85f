//! Person, goal and group edits addressed by cell.

use tracing::debug;

use cr_core::{GroupId, PersonId, Point};
use cr_grid::{Grid, Person};

use crate::{EditError, EditResult, Viewport};

/// An edit applied to one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellEdit {
    /// Add a person with a fresh id heading for `goal`, and mark the goal.
    PlacePerson { goal: Point },
    /// Remove the primary occupant.
    RemovePerson,
    SetGoal,
    RemoveGoal,
    /// Add `count` persons as one group heading for `goal`.
    PlaceGroup { count: u32, goal: Point },
    /// Remove the group anchored here and its members.
    RemoveGroup,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    PersonPlaced(PersonId),
    GroupPlaced(GroupId),
    Changed,
    /// Nothing to remove, already in the requested state, or refused
    /// because a person and a goal would share the cell.
    Unchanged,
}

fn changed(flag: bool) -> EditOutcome {
    if flag { EditOutcome::Changed } else { EditOutcome::Unchanged }
}

fn unchanged(cell: Point, edit: CellEdit) -> EditOutcome {
    debug!(%cell, ?edit, "cell edit refused; persons and goals never share a cell");
    EditOutcome::Unchanged
}

/// Apply `edit` at `cell`.
///
/// Persons and goals are kept on separate cells: placing a person or group
/// on a goal, or a goal under a person, is [`EditOutcome::Unchanged`].
/// Removals that find nothing are `Unchanged` too, not errors.
///
/// # Errors
///
/// [`EditError::OutOfBounds`] if `cell`, or the goal of a placement, is
/// outside the grid.
pub fn apply_cell_edit(grid: &mut Grid, cell: Point, edit: CellEdit) -> EditResult<EditOutcome> {
    if !grid.contains(cell) {
        return Err(EditError::OutOfBounds { point: cell });
    }
    let outcome = match edit {
        CellEdit::PlacePerson { goal } => {
            if !grid.contains(goal) {
                return Err(EditError::OutOfBounds { point: goal });
            }
            if grid.has_goal(cell) {
                return Ok(unchanged(cell, edit));
            }
            let id = grid.next_person_id();
            grid.insert_person(Person::new(id, cell, goal))?;
            grid.set_goal(goal);
            EditOutcome::PersonPlaced(id)
        }
        CellEdit::RemovePerson => changed(grid.remove_person_at(cell).is_some()),
        CellEdit::SetGoal => {
            changed(!grid.has_goal(cell) && !grid.is_occupied(cell) && grid.set_goal(cell))
        }
        CellEdit::RemoveGoal => changed(grid.remove_goal(cell)),
        CellEdit::PlaceGroup { count, goal } => {
            if !grid.contains(goal) {
                return Err(EditError::OutOfBounds { point: goal });
            }
            if grid.has_goal(cell) {
                return Ok(unchanged(cell, edit));
            }
            EditOutcome::GroupPlaced(grid.place_group(cell, count, goal)?)
        }
        CellEdit::RemoveGroup => changed(grid.remove_group_at(cell).is_some()),
    };
    debug!(%cell, ?edit, ?outcome, "cell edit");
    Ok(outcome)
}

/// [`Viewport::pointer_to_cell`] then [`apply_cell_edit`].
pub fn apply_pointer_edit(
    grid:     &mut Grid,
    viewport: &Viewport,
    x:        f64,
    y:        f64,
    edit:     CellEdit,
) -> EditResult<EditOutcome> {
    let cell = viewport.pointer_to_cell(x, y)?;
    apply_cell_edit(grid, cell, edit)
}
