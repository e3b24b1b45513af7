//! Strip prune and prune-check kernels
//!
//! Each block covers a 16×16 macro tile of one batch and runs 64 lanes. Lane
//! `l` owns row `l % 16` of the tile and the 4 columns starting at
//! `4 * (l / 16)`; that group of 4 is the unit the selector works on.
//!
//! Positions past the last column or at/after `bound` read as zero and are
//! never written, so partial tiles at the matrix edge and short buffers are
//! both safe.

use super::for_each_block;
use crate::dtype::Element;
use crate::prune::view::{
    LANES_PER_BLOCK, MACRO_TILE_0, MACRO_TILE_1, SUBGROUP_0, THREAD_TILE_0, THREAD_TILE_1,
};
use crate::prune::{BlockIdx, GROUP_SIZE, KEEP_PER_GROUP, StridedView, select_pair};
use std::sync::atomic::{AtomicI32, Ordering};

/// Linear positions of the groups owned by the lanes of one block
///
/// Calls `f` with the 4 positions of each group (`None` where masked).
/// Stops early when `f` returns `false`.
#[inline]
fn for_each_group<F>(view: &StridedView, bound: usize, block: BlockIdx, mut f: F)
where
    F: FnMut([Option<usize>; GROUP_SIZE]) -> bool,
{
    for lane in 0..LANES_PER_BLOCK {
        let row0 = block.x * MACRO_TILE_0 + (lane % SUBGROUP_0) * THREAD_TILE_0;
        let col0 = block.y * MACRO_TILE_1 + (lane / SUBGROUP_0) * THREAD_TILE_1;
        if col0 >= view.n || row0 >= view.m {
            continue;
        }

        for row in (row0..row0 + THREAD_TILE_0).take_while(|&r| r < view.m) {
            for col in (col0..col0 + THREAD_TILE_1).step_by(GROUP_SIZE) {
                let positions = std::array::from_fn(|k| {
                    let c = col + k;
                    if c >= view.n {
                        return None;
                    }
                    let pos = view.offset(block.z, row, c);
                    (pos < bound).then_some(pos)
                });
                if !f(positions) {
                    return;
                }
            }
        }
    }
}

#[inline]
unsafe fn load_group<T: Element>(
    input: *const T,
    positions: &[Option<usize>; GROUP_SIZE],
) -> [T; GROUP_SIZE] {
    positions.map(|p| match p {
        Some(pos) => input.add(pos).read(),
        None => T::zero(),
    })
}

/// Strip-prune every group of the view
///
/// With `IN_PLACE`, kept values are not rewritten.
///
/// # Safety
/// - `input` and `output` must be valid for `bound` elements
/// - `output` must either equal `input` (and `IN_PLACE` be set) or not
///   overlap it
/// - the view must map distinct `(batch, row, col)` to distinct positions
pub unsafe fn prune_strip_kernel<T: Element, const IN_PLACE: bool>(
    input: *const T,
    output: *mut T,
    view: &StridedView,
    bound: usize,
    min_len: usize,
) {
    let in_addr = input as usize;
    let out_addr = output as usize;
    let view = *view;

    for_each_block(view.grid(), min_len, |block| unsafe {
        let input = in_addr as *const T;
        let output = out_addr as *mut T;

        for_each_group(&view, bound, block, |positions| {
            let values = load_group(input, &positions);
            let (a, b) = select_pair(&values);

            for (k, pos) in positions.iter().enumerate() {
                let Some(pos) = *pos else { continue };
                if k != a && k != b {
                    output.add(pos).write(T::zero());
                } else if !IN_PLACE {
                    output.add(pos).write(values[k]);
                }
            }
            true
        });
    });
}

/// Set `*flag` to 1 if any group holds more than 2 strictly positive values
///
/// `*flag` must be zero on entry; it is never reset here. Lanes stop once
/// the flag is observed set.
///
/// # Safety
/// - `input` must be valid for `bound` elements
/// - `flag` must be valid, aligned and only accessed atomically for the
///   duration of the call
pub unsafe fn prune_check_kernel<T: Element>(
    input: *const T,
    flag: *mut i32,
    view: &StridedView,
    bound: usize,
    min_len: usize,
) {
    let in_addr = input as usize;
    let flag = AtomicI32::from_ptr(flag);
    let view = *view;

    for_each_block(view.grid(), min_len, |block| unsafe {
        let input = in_addr as *const T;

        for_each_group(&view, bound, block, |positions| {
            if flag.load(Ordering::Relaxed) != 0 {
                return false;
            }
            let values = load_group(input, &positions);
            let positive = values.iter().filter(|v| v.is_positive()).count();
            if positive > KEEP_PER_GROUP {
                flag.store(1, Ordering::Relaxed);
                return false;
            }
            true
        });
    });
}
