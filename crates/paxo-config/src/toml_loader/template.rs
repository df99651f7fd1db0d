//! Commented default config written on first start.

pub(super) fn default_config_toml() -> String {
    r##"# Paxo script host configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[script]
# entry_point = "run"     # global function called after the script loads
# memory_limit = 0        # bytes of Lua heap, 0 = unlimited

[dispatch]
# mode = "continuous"     # continuous, single_shot
# trigger = "level"       # level (every frame while held), edge (once per touch)
# frame_rate = 50         # 1-240
# max_frames = 0          # 0 = run until quit

[display]
# width = 320
# height = 480

[colors]
# light = "#f8f9fa"
# black = "#000000"
# primary = "#0d6efd"
# success = "#198754"
# warning = "#ffc107"
# blue = "#0000ff"

[logging]
# level = "info"          # trace, debug, info, warn, error
"##
    .to_string()
}
