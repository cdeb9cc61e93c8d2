// pantry configuration
// Edit this file to customize the editor, then rebuild

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // Keybindings
    // Navigation and accepting inside the dropdown are fixed (Up/Down, Enter/Tab, Esc)
    config.bind("^S", "save");
    config.bind("^Q", "quit");

    // Appearance
    // Themes: "default" (colors) or "mono" (bold/underline/italic only)
    config.set("theme", "default");
    config.set("dropdown_height", 8);
    config.set("tab_width", 4);

    // Autocomplete
    // Quiet period (ms) after the last edit before known names are refreshed
    config.set("debounce_ms", 300);
}
