use crate::prelude::*;
use crate::state::AppState;

/// Prints the scaffold an empty model renders to
pub fn new_document() -> Result<()> {
    print!("{}", crate::emit::render(&AppState::default()));

    Ok(())
}
