//! Cascading shift: freeing a Z by moving widgets up by one
//!
//! ## Algorithm
//!
//! 1. If nothing occupies the target Z, return immediately.
//! 2. Enumerate occupied Z values >= target, highest first.
//! 3. Pick the candidates according to the [`ShiftPolicy`].
//! 4. Check that the highest candidate can still move up (`Z::MAX` cannot).
//! 5. Highest first: remove the widget at `z`, re-insert a copy at `z + 1`.
//!
//! Walking highest-first means `z + 1` is always free when a widget moves
//! there: either it was vacated by the previous step or it was never
//! occupied. The widget's id, width and height never change.
//!
//! Step 4 runs before any mutation, so a failed cascade leaves the store
//! untouched.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};
use zstack_core::{Error, Result, ZOrderedMut, Z};

/// Which widgets move when a Z is freed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftPolicy {
    /// Only the run of consecutive occupied Z values starting at the target
    /// moves; everything above the first gap stays put.
    Contiguous,
    /// Every widget at or above the target moves.
    #[default]
    Tail,
}

impl ShiftPolicy {
    /// Config spelling of this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftPolicy::Contiguous => "contiguous",
            ShiftPolicy::Tail => "tail",
        }
    }
}

impl fmt::Display for ShiftPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "contiguous" => Ok(ShiftPolicy::Contiguous),
            "tail" => Ok(ShiftPolicy::Tail),
            other => Err(Error::config(format!(
                "Invalid shift policy '{}'. Expected \"contiguous\" or \"tail\".",
                other
            ))),
        }
    }
}

/// Ensure no widget occupies `target`, shifting occupants up by one
///
/// Must be called on a store the caller holds exclusively for the whole
/// compound operation (an `OrderedStore` write guard, or a bare state).
///
/// Returns the number of widgets moved.
///
/// # Errors
///
/// Returns `ZOverflow` if a widget at `Z::MAX` would have to move. Nothing is
/// modified in that case.
pub fn make_space_for_z<S>(store: &mut S, target: Z, policy: ShiftPolicy) -> Result<usize>
where
    S: ZOrderedMut + ?Sized,
{
    if !store.is_z_occupied(target) {
        return Ok(0);
    }

    let zs = store.zs_greater_or_equal_desc(target);
    let candidates = match policy {
        ShiftPolicy::Tail => &zs[..],
        ShiftPolicy::Contiguous => {
            let run = contiguous_run_len(&zs, target);
            &zs[zs.len() - run..]
        }
    };

    if candidates.first() == Some(&Z::MAX) {
        return Err(Error::ZOverflow { z: target });
    }

    for &z in candidates {
        let Some(widget) = store.remove_by_z(z) else {
            panic!("z={} listed as occupied but holds no widget", z);
        };
        store.put(widget.with_z(z + 1));
        trace!(target: "zstack::ordering", id = %widget.id, from = z, to = z + 1, "shifted");
    }

    debug!(
        target: "zstack::ordering",
        target_z = target,
        shifted = candidates.len(),
        policy = %policy,
        "made space"
    );
    Ok(candidates.len())
}

/// Count the consecutive Z values starting at `target` in a descending list
fn contiguous_run_len(desc: &[Z], target: Z) -> usize {
    desc.iter()
        .rev()
        .zip(0i64..)
        .take_while(|(z, offset)| target.checked_add(*offset) == Some(**z))
        .count()
}
