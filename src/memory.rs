use crate::error::{ExevalatorError, Result};
use log::debug;

/// Storage of variable values, addressed by dense indices assigned in declaration order.
///
/// Allocated cells are never moved to other addresses; the storage only grows,
/// doubling its capacity when every allocated cell is in use.
#[derive(Debug, Clone)]
pub struct Memory {
    cells: Vec<f64>,
    usage: usize,
}

impl Memory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: vec![0.0; capacity.max(1)],
            usage: 0,
        }
    }

    /// Allocates a cell initialized to 0.0 and returns its address.
    pub fn allocate(&mut self) -> usize {
        if self.usage == self.cells.len() {
            let capacity = self.cells.len() * 2;
            debug!("growing variable storage: {} -> {capacity}", self.cells.len());
            self.cells.resize(capacity, 0.0);
        }
        let address = self.usage;
        self.usage += 1;
        address
    }

    pub fn read(&self, address: usize) -> Result<f64> {
        self.as_slice()
            .get(address)
            .copied()
            .ok_or(ExevalatorError::InvalidMemoryAddress { address })
    }

    pub fn write(&mut self, address: usize, value: f64) -> Result<()> {
        let cell = self.cells[..self.usage]
            .get_mut(address)
            .ok_or(ExevalatorError::InvalidMemoryAddress { address })?;
        *cell = value;
        Ok(())
    }

    pub fn usage(&self) -> usize {
        self.usage
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// The allocated cells, i.e. addresses `0..usage`.
    pub fn as_slice(&self) -> &[f64] {
        &self.cells[..self.usage]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_grows_by_doubling() {
        let mut memory = Memory::with_capacity(2);
        assert_eq!(memory.allocate(), 0);
        assert_eq!(memory.allocate(), 1);
        assert_eq!(memory.capacity(), 2);
        memory.write(1, 1.5).unwrap();

        assert_eq!(memory.allocate(), 2);
        assert_eq!(memory.capacity(), 4);
        assert_eq!(memory.usage(), 3);
        assert_eq!(memory.read(1).unwrap(), 1.5);
        assert_eq!(memory.read(2).unwrap(), 0.0);
    }

    #[test]
    fn test_access_outside_usage_fails() {
        let mut memory = Memory::with_capacity(4);
        memory.allocate();
        assert_eq!(
            memory.read(1),
            Err(ExevalatorError::InvalidMemoryAddress { address: 1 })
        );
        assert_eq!(
            memory.write(3, 1.0),
            Err(ExevalatorError::InvalidMemoryAddress { address: 3 })
        );
        assert_eq!(memory.as_slice().len(), 1);
    }

    #[test]
    fn test_zero_capacity_still_grows() {
        let mut memory = Memory::with_capacity(0);
        for expected in 0..5 {
            assert_eq!(memory.allocate(), expected);
        }
        assert_eq!(memory.capacity(), 8);
    }
}
