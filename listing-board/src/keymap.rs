//! Default key bindings

use listing_core::Keybindings;

pub const ADD: &str = "add";
pub const INCREMENT: &str = "increment";
pub const QUIT: &str = "quit";

/// Bindings in help-bar order.
pub fn default_keybindings() -> Keybindings {
    let mut keys = Keybindings::new();
    keys.bind(ADD, ["a"])
        .bind(INCREMENT, ["i", "+"])
        .bind(QUIT, ["q", "esc"]);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_core::testing::key;

    #[test]
    fn test_default_bindings() {
        let keys = default_keybindings();
        assert_eq!(keys.command_for(&key("a")), Some(ADD));
        assert_eq!(keys.command_for(&key("+")), Some(INCREMENT));
        assert_eq!(keys.command_for(&key("i")), Some(INCREMENT));
        assert_eq!(keys.command_for(&key("esc")), Some(QUIT));
        assert_eq!(keys.command_for(&key("x")), None);
        assert_eq!(keys.commands().collect::<Vec<_>>(), vec![ADD, INCREMENT, QUIT]);
    }
}
