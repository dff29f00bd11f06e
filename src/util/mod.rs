mod normalize;
mod recipe_id;

pub use normalize::{normalize_label, normalize_labels};
pub use recipe_id::recipe_id;
