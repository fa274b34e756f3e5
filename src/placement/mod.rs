//! Activity placement: from itinerary entries to map coordinates

pub mod offset;
pub mod placer;
