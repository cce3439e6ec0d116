use crate::error::ScfError;
use crate::reader::Reader;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    /// In-file object identifier
    pub id: u16,
    /// Export name, absent when the length byte was 255
    pub name: Option<String>,
}

/// Identifier to name mapping declared at the start of the stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportTable {
    entries: Vec<Export>,
}

impl ExportTable {
    /// Reads a u16 count, `count` identifiers, then `count` names.
    pub fn read(reader: &mut Reader<'_>) -> Result<Self, ScfError> {
        let count = usize::from(reader.read_u16()?);
        let ids = reader.read_u16_array(count)?;

        let mut entries = Vec::with_capacity(count);
        for id in ids {
            let name = reader.read_ascii()?;
            entries.push(Export { id, name });
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Export> {
        self.entries.iter()
    }

    /// Name exported for `id`. Later declarations of the same id win.
    pub fn name(&self, id: u16) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.id == id)
            .and_then(|entry| entry.name.as_deref())
    }

    /// Identifier exported under `name`
    pub fn find(&self, name: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_deref() == Some(name))
            .map(|entry| entry.id)
    }
}
