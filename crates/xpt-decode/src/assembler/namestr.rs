//! NAMESTR reassembly.

use tracing::trace;

use super::RollingBuffer;
use crate::error::Result;
use crate::header::{DescriptorSize, parse_namestr};
use crate::types::Variable;

/// Cuts NAMESTR descriptors out of the NAMESTR section.
#[derive(Debug, Clone, Copy)]
pub struct NamestrAssembler {
    descriptor_size: DescriptorSize,
}

impl NamestrAssembler {
    #[must_use]
    pub fn new(descriptor_size: DescriptorSize) -> Self {
        Self { descriptor_size }
    }

    /// Append one physical record and turn every complete descriptor now in
    /// the buffer into a variable.
    ///
    /// Returns the number of variables added.
    ///
    /// # Errors
    ///
    /// [`crate::XptError::InvalidNamestr`] if a descriptor is malformed.
    pub fn push(
        &self,
        buffer: &mut RollingBuffer,
        record: &[u8],
        variables: &mut Vec<Variable>,
    ) -> Result<usize> {
        buffer.append(record);

        let width = self.descriptor_size.byte_len();
        let mut emitted = 0usize;
        while let Some(bytes) = buffer.pop(width) {
            let index = variables.len();
            let namestr = parse_namestr(bytes, index)?;
            trace!(
                index,
                name = %namestr.name,
                length = namestr.length,
                type_code = namestr.type_code,
                "parsed NAMESTR"
            );
            variables.push(Variable::from_namestr(index + 1, namestr));
            emitted += 1;
        }
        Ok(emitted)
    }
}
