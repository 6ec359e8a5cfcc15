// ==============================================================================
// input.rs — INPUT AGGREGATION
// ------------------------------------------------------------------------------
// Reduces an ordered list of input sources to one 2D axis vector per tick:
// x = turn (-1..1), y = throttle (-1..1). The last source reporting a
// non-zero vector wins outright (not summed, not first-wins), so e.g. a
// later-registered gamepad overrides an idle keyboard. The list is passed in
// explicitly each tick; there is no global source registry.
// ==============================================================================

use crate::kart::types::{v2_sqr_mag, Vec2};

/// One device (or synthetic driver) that can steer the kart. Polling must be
/// side-effect-free; the aggregator may poll every source every tick.
pub trait InputSource {
    fn poll(&self) -> Vec2;
}

/// Fold the sources in order; any source with a strictly positive squared
/// magnitude overwrites the running result.
pub fn aggregate(sources: &[&dyn InputSource]) -> Vec2 {
    let mut result = [0.0, 0.0];

    for source in sources {
        let current = source.poll();
        if v2_sqr_mag(current) > 0.0 {
            result = current;
        }
    }

    result
}
