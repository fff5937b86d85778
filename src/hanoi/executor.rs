use super::error::HanoiError;
use super::solver::Operation;
use super::tower::Board;

/// Transfers the top disk of `op.source` onto `op.destination`.
///
/// The board is left untouched on error. Errors mean the plan and the board
/// disagree, which never happens for a plan from `solve` replayed on the
/// stack it was made for.
pub fn apply_move(board: &mut Board, op: &Operation) -> Result<(), HanoiError> {
    let (source, destination) = board
        .pair_mut(op.source, op.destination)
        .ok_or(HanoiError::SamePeg { peg: op.source })?;

    let top = source
        .top()
        .ok_or(HanoiError::EmptySource { peg: op.source })?;
    if top.index() != op.disk {
        return Err(HanoiError::DiskMismatch {
            peg: op.source,
            expected: op.disk,
            found: top.index(),
        });
    }
    // Larger index means narrower disk.
    if let Some(below) = destination.top() {
        if below.index() > op.disk {
            return Err(HanoiError::IllegalPlacement {
                peg: op.destination,
                disk: op.disk,
                below: below.index(),
            });
        }
    }

    let Some(disk) = source.pop() else {
        return Err(HanoiError::EmptySource { peg: op.source });
    };
    destination.push(disk);
    Ok(())
}

/// Same transfer as `apply_move`, appending `op` to `log` on success.
pub fn apply_and_record(board: &mut Board, op: &Operation, log: &mut Vec<Operation>) -> Result<(), HanoiError> {
    apply_move(board, op)?;
    log.push(*op);
    Ok(())
}
