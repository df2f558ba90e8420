#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Command {
    Push,
    Pop,
    Swap,
    Dup,
    ReversePush,
    ReversePop,
    ReverseSwap,
    ReverseDup,
}

const COMMANDS: [(&str, Command); 8] = [
    ("PUSH", Command::Push),
    ("POP", Command::Pop),
    ("SWAP", Command::Swap),
    ("DUP", Command::Dup),
    ("rPUSH", Command::ReversePush),
    ("rPOP", Command::ReversePop),
    ("rSWAP", Command::ReverseSwap),
    ("rDUP", Command::ReverseDup),
];

impl Command {
    /// Commands are case-sensitive, so `push` is not `PUSH`.
    pub fn from_token(token: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, command)| *command)
    }

    pub fn as_str(&self) -> &'static str {
        COMMANDS
            .iter()
            .find(|(_, command)| command == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    pub fn argument_count(&self) -> usize {
        match self {
            Command::Push | Command::ReversePush => 1,
            _ => 0,
        }
    }
}
