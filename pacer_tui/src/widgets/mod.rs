mod command_keys_help_bar;
mod ecg_strip;
mod key_maps;

pub use command_keys_help_bar::KeyMapHelpBar;
pub use ecg_strip::EcgStrip;
pub use key_maps::KeyDesc;
pub use key_maps::KeyId;
pub use key_maps::KeyMap;
pub use key_maps::KeyMaps;
