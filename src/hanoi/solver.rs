use super::tower::Peg;

/// One step of the plan: move the top disk of `source` (which must be
/// disk `disk`) onto `destination`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Operation {
    pub source: Peg,
    pub destination: Peg,
    pub disk: usize,
}

impl Operation {
    pub fn new(source: Peg, destination: Peg, disk: usize) -> Self {
        Self {
            source,
            destination,
            disk,
        }
    }

    /// Human-readable line for move `step` (0-based) of `total`.
    pub fn describe(&self, step: usize, total: usize) -> String {
        format!(
            "[{}/{}] Mover disco {} de {} a {}",
            step + 1,
            total,
            self.disk,
            self.source,
            self.destination
        )
    }
}

/// Number of moves needed for `disk_count` disks: 2^n - 1.
/// Saturates for counts that do not fit in 64 bits.
pub fn required_moves(disk_count: u32) -> u64 {
    1u64.checked_shl(disk_count).map_or(u64::MAX, |p| p - 1)
}

/// Optimal move sequence for `disk_count` disks stacked on `source`.
///
/// Disk indices follow the board convention: 0 is the widest disk, so the
/// top of a fresh stack is `disk_count - 1`. Only tower identities are
/// involved; no board state is read or written.
pub fn solve(disk_count: u32, source: Peg, auxiliary: Peg, destination: Peg) -> Vec<Operation> {
    let capacity = required_moves(disk_count).min(1 << 16) as usize;
    let mut plan = Vec::with_capacity(capacity);
    if disk_count > 0 {
        plan_subtower(disk_count as usize, disk_count as usize, source, auxiliary, destination, &mut plan);
    }
    plan
}

/// Moves the top `height` disks of a `total`-disk set. The widest of those,
/// and the one moved in the middle step, is disk `total - height`.
fn plan_subtower(
    height: usize,
    total: usize,
    source: Peg,
    auxiliary: Peg,
    destination: Peg,
    plan: &mut Vec<Operation>,
) {
    let disk = total - height;
    if height == 1 {
        plan.push(Operation::new(source, destination, disk));
        return;
    }
    plan_subtower(height - 1, total, source, destination, auxiliary, plan);
    plan.push(Operation::new(source, destination, disk));
    plan_subtower(height - 1, total, auxiliary, source, destination, plan);
}
