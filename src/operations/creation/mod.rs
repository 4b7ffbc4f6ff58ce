mod make_boolean;
mod make_box;
mod make_placement;
mod make_tube;
mod make_volume;

pub use make_boolean::{BooleanStep, MakeBoolean};
pub use make_box::MakeBox;
pub use make_placement::MakePlacement;
pub use make_tube::MakeTube;
pub use make_volume::MakeVolume;
