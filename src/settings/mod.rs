pub mod store;

pub use store::{
    AppSettings, default_data_dir, default_settings_path, load_settings, save_settings,
};
