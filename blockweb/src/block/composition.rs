use crate::block::BlockInstance;
use crate::error::BlockError;
use crate::value::ParamValue;

/// The ordered working set of block instances. Order decides the order of
/// generated output within each region.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    blocks: Vec<BlockInstance>,
}

impl Composition {
    pub fn new() -> Self {
        Composition::default()
    }

    pub fn blocks(&self) -> &[BlockInstance] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BlockInstance> {
        self.blocks.get(index)
    }

    /// Append an instance (a drop onto the composition area).
    pub fn push(&mut self, instance: BlockInstance) {
        self.blocks.push(instance);
    }

    pub fn remove(&mut self, index: usize) -> Result<BlockInstance, BlockError> {
        self.check_index(index)?;
        Ok(self.blocks.remove(index))
    }

    /// Deep-copy the instance at `index` and append the copy. Returns the
    /// copy's index.
    pub fn duplicate(&mut self, index: usize) -> Result<usize, BlockError> {
        self.check_index(index)?;
        let copy = self.blocks[index].duplicate();
        self.blocks.push(copy);
        Ok(self.blocks.len() - 1)
    }

    /// Edit one parameter in place; order is unchanged.
    pub fn set_parameter(
        &mut self,
        index: usize,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<(), BlockError> {
        self.get_mut(index)?.set_parameter(name, value)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut BlockInstance, BlockError> {
        let len = self.blocks.len();
        self.blocks
            .get_mut(index)
            .ok_or(BlockError::IndexOutOfRange { index, len })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut BlockInstance> {
        self.blocks.iter_mut()
    }

    /// Render every instance in order.
    pub fn render_all(&mut self) -> Vec<String> {
        self.blocks.iter_mut().map(BlockInstance::render).collect()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    fn check_index(&self, index: usize) -> Result<(), BlockError> {
        if index < self.blocks.len() {
            Ok(())
        } else {
            Err(BlockError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            })
        }
    }
}

impl FromIterator<BlockInstance> for Composition {
    fn from_iter<I: IntoIterator<Item = BlockInstance>>(iter: I) -> Self {
        Composition {
            blocks: iter.into_iter().collect(),
        }
    }
}
