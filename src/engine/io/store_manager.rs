//! The lowest storage layer, holding every table's encoded rows in memory.
//! The original table data is owned by an external loader so append + scan
//! is the whole contract, there is no update or delete.
use async_stream::stream;
use bytes::Bytes;
use futures::stream::Stream;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct StoreManager {
    data: Arc<RwLock<HashMap<Uuid, Vec<Bytes>>>>, //Yes this is the naive implementation
}

impl StoreManager {
    pub fn new() -> StoreManager {
        StoreManager {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    //Extracted the actual logic into its own method so I could implement stream
    async fn get_row_int(
        d: Arc<RwLock<HashMap<Uuid, Vec<Bytes>>>>,
        resource_key: &Uuid,
        offset: usize,
    ) -> Option<Bytes> {
        let read_lock = d.read().await;

        let value = read_lock.get(resource_key)?;

        let row = value.get(offset)?;
        Some(row.clone())
    }

    pub async fn get_row(&self, resource_key: &Uuid, offset: usize) -> Option<Bytes> {
        StoreManager::get_row_int(self.data.clone(), resource_key, offset).await
    }

    pub fn get_stream(&self, resource_key: Uuid) -> impl Stream<Item = Bytes> {
        let data = self.data.clone();
        stream! {
            let mut offset = 0;
            loop {
                match StoreManager::get_row_int(data.clone(), &resource_key, offset).await {
                    Some(r) => {
                        yield r;
                    },
                    None => {
                        return ();
                    }
                }
                offset += 1;
            }
        }
    }

    pub async fn add_row(
        &self,
        resource_key: &Uuid,
        row: Bytes,
    ) -> Result<usize, StoreManagerError> {
        if row.is_empty() {
            return Err(StoreManagerError::EmptyRow(*resource_key));
        }

        let mut write_lock = self.data.write().await;

        match write_lock.get_mut(resource_key) {
            Some(v) => {
                let offset = v.len();
                v.push(row);
                Ok(offset)
            }
            None => {
                let vec_holder = vec![row];
                write_lock.insert(*resource_key, vec_holder);
                Ok(0)
            }
        }
    }

    pub async fn row_count(&self, resource_key: &Uuid) -> usize {
        let read_lock = self.data.read().await;
        read_lock.get(resource_key).map_or(0, Vec::len)
    }
}

impl Default for StoreManager {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum StoreManagerError {
    #[error("Refusing to store a zero length row into {0}")]
    EmptyRow(Uuid),
}
