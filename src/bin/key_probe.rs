//! Key probe: print every raw input byte and what it maps to.
//!
//! Useful when writing a `BLOCKFALL_KEYS` file: press keys and read off the
//! byte values. Ctrl-C (byte 3) quits.

use anyhow::Result;
use crossterm::terminal;

use blockfall::input::{InputCommand, InputQueue, InputTranslator};
use blockfall::AppConfig;

/// Raw mode for as long as this lives
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn describe(byte: u8) -> String {
    match byte {
        b' ' => "' '".to_string(),
        0x21..=0x7e => format!("'{}'", byte as char),
        0x1b => "ESC".to_string(),
        0x7f => "DEL".to_string(),
        0x00..=0x1f => format!("^{}", (byte + 0x40) as char),
        _ => "-".to_string(),
    }
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let translator = InputTranslator::new(&config.key_bindings()?)?;

    let _raw = RawMode::enable()?;
    let queue = InputQueue::stdin()?;

    print!("press keys, Ctrl-C to quit\r\n");
    loop {
        let Some(byte) = queue.pop_timeout(std::time::Duration::from_millis(250)) else {
            continue;
        };
        let command = translator.translate(byte);
        let meaning = match command {
            Some(InputCommand::Quit) => "quit",
            Some(InputCommand::Action(action)) => action.as_str(),
            None => "unbound",
        };
        print!("{byte:3}  0x{byte:02x}  {:<5} -> {meaning}\r\n", describe(byte));
        if command == Some(InputCommand::Quit) {
            break;
        }
    }
    Ok(())
}
