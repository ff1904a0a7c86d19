use log::warn;

/// The call stack holding return addresses. Unlike the original hardware the
/// stack is not limited to 16 entries.
#[derive(Debug, Default)]
pub struct CallStack {
    addresses: Vec<u16>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            addresses: Vec::new(),
        }
    }

    pub fn push(&mut self, address: u16) {
        self.addresses.push(address);
    }

    /// Pops the most recently pushed return address. Returning with an empty
    /// stack is not fatal: a warning is logged and address 0 is returned.
    pub fn pop(&mut self) -> u16 {
        match self.addresses.pop() {
            Some(address) => address,
            None => {
                warn!("Tried popping from the call stack while it is empty, returning to 0x000");
                0
            }
        }
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn peek(&self) -> Option<u16> {
        self.addresses.last().copied()
    }
}
