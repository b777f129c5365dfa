pub mod selection_loader;

pub use selection_loader::{load_selected_file, load_selection_from_folder, load_selection_from_paths};
