use crate::map::tile::Tile;

#[derive(Debug, Clone, Copy)]
pub enum Action {
    /// Player step in play mode (dx only), cursor step in edit mode.
    Move(i32, i32),
    Jump,
    Reset,

    Paint(Tile),
    ToggleEdit,

    ToggleLevelText,
    TypeChar(char),
    Newline,
    Backspace,
    LoadLevel,

    NewRandomLevel,

    Quit,
    None,
}
