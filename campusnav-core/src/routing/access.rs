//! Edge admissibility for a requested mode

use crate::model::{Mode, ModeTag, TagMode, TripContext};

/// Decides whether an edge with `tags` may be traversed in `mode`.
///
/// Rules, first match wins:
/// 1. no tags: unrestricted
/// 2. a tag names exactly the requested mode
/// 3. walking requested and a tag mentions `W`
/// 4. four-wheeler requested and a tag is a parking or pickup variant
/// 5. a conditional tag admits the mode and its place matches the trip
/// 6. otherwise only walking is allowed
pub fn is_allowed(tags: &[ModeTag], mode: Mode, trip: &TripContext<'_>) -> bool {
    if tags.is_empty() {
        return true;
    }

    if tags
        .iter()
        .filter_map(ModeTag::tag_mode)
        .any(|tag| tag.is_exactly(mode))
    {
        return true;
    }

    if mode == Mode::Walking && tags.iter().any(ModeTag::mentions_walking) {
        return true;
    }

    if mode == Mode::FourWheeler
        && tags
            .iter()
            .filter_map(ModeTag::tag_mode)
            .any(TagMode::is_four_wheeler_variant)
    {
        return true;
    }

    let conditional_match = tags.iter().any(|tag| match tag {
        ModeTag::Conditional(conditional) => {
            conditional.allowed.admits(mode) && conditional.condition.matches(trip)
        }
        _ => false,
    });
    if conditional_match {
        return true;
    }

    mode == Mode::Walking
}
