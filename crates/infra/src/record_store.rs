use lapis_core::Entity;

use crate::error::StoreResult;

/// Keyed-record CRUD over a whole-document store.
///
/// Implementors provide document load/save; lookups and upserts are derived
/// from [`Entity::id`].
pub trait RecordStore {
    type Record: Entity + Clone;

    /// Read every record. A missing document is an empty store.
    fn load_all(&self) -> StoreResult<Vec<Self::Record>>;

    /// Replace the whole document.
    fn save_all(&self, records: &[Self::Record]) -> StoreResult<()>;

    /// Checked before a record is written.
    fn check(&self, _record: &Self::Record) -> StoreResult<()> {
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<Self::Record>> {
        self.load_all()
    }

    fn get(&self, id: &<Self::Record as Entity>::Id) -> StoreResult<Option<Self::Record>> {
        Ok(self.load_all()?.into_iter().find(|r| r.id() == id))
    }

    /// Replace the record with the same id, otherwise append.
    fn upsert(&self, record: Self::Record) -> StoreResult<()> {
        self.check(&record)?;
        let mut records = self.load_all()?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        self.save_all(&records)
    }

    /// Returns `true` iff a record was removed.
    fn delete(&self, id: &<Self::Record as Entity>::Id) -> StoreResult<bool> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save_all(&records)?;
        Ok(true)
    }
}
