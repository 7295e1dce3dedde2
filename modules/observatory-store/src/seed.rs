//! Administrative seeding: clear both collections and repopulate them from a
//! dataset. Runs out of band; the live session never writes.

use firestore_client::{Document, FirestoreClient, Write, MAX_BATCH_WRITES};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::info;

use observatory_common::{Collection, ObservatoryError, Risk, SeedDataset, Solution};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub deleted_risks: usize,
    pub deleted_solutions: usize,
    pub written_risks: usize,
    pub written_solutions: usize,
}

impl std::fmt::Display for SeedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "deleted {} risks and {} solutions, wrote {} risks and {} solutions",
            self.deleted_risks, self.deleted_solutions, self.written_risks, self.written_solutions
        )
    }
}

pub struct Seeder<'a> {
    client: &'a FirestoreClient,
}

impl<'a> Seeder<'a> {
    pub fn new(client: &'a FirestoreClient) -> Self {
        Self { client }
    }

    /// Replace the store contents with `dataset`. With `clear = false`
    /// existing documents that are not in the dataset survive.
    pub async fn seed(
        &self,
        dataset: &SeedDataset,
        clear: bool,
    ) -> Result<SeedReport, ObservatoryError> {
        dataset.validate()?;
        let mut report = SeedReport::default();

        if clear {
            report.deleted_risks = self.clear(Collection::Risks).await?;
            report.deleted_solutions = self.clear(Collection::Solutions).await?;
        }

        let risk_writes = build_writes(self.client, Collection::Risks, &dataset.risks, risk_id)?;
        report.written_risks = self.commit_all(Collection::Risks, &risk_writes).await?;

        let solution_writes = build_writes(
            self.client,
            Collection::Solutions,
            &dataset.solutions,
            solution_id,
        )?;
        report.written_solutions = self
            .commit_all(Collection::Solutions, &solution_writes)
            .await?;

        info!(%report, "Seeding complete");
        Ok(report)
    }

    /// Delete every document in a collection. Returns how many were deleted.
    pub async fn clear(&self, collection: Collection) -> Result<usize, ObservatoryError> {
        let documents = self
            .client
            .list_documents(collection.as_str())
            .await
            .map_err(|e| ObservatoryError::Seed(format!("listing {collection}: {e}")))?;

        let deletes: Vec<Write> = documents
            .into_iter()
            .map(|doc| Write::Delete(doc.name))
            .collect();
        let deleted = self.commit_all(collection, &deletes).await?;
        info!(%collection, deleted, "Cleared collection");
        Ok(deleted)
    }

    async fn commit_all(
        &self,
        collection: Collection,
        writes: &[Write],
    ) -> Result<usize, ObservatoryError> {
        for batch in writes.chunks(MAX_BATCH_WRITES) {
            self.client
                .commit(batch)
                .await
                .map_err(|e| ObservatoryError::Seed(format!("committing {collection}: {e}")))?;
        }
        Ok(writes.len())
    }
}

fn risk_id(risk: &Risk) -> &str {
    &risk.id
}

fn solution_id(solution: &Solution) -> &str {
    &solution.id
}

/// One full-document write per record, keyed by the record's id.
pub fn build_writes<T: Serialize>(
    client: &FirestoreClient,
    collection: Collection,
    records: &[T],
    id: impl Fn(&T) -> &str,
) -> Result<Vec<Write>, ObservatoryError> {
    records
        .iter()
        .map(|record| {
            let body = match serde_json::to_value(record) {
                Ok(JsonValue::Object(body)) => body,
                Ok(_) => {
                    return Err(ObservatoryError::Seed(format!(
                        "{collection} record {} is not an object",
                        id(record)
                    )))
                }
                Err(e) => return Err(ObservatoryError::Seed(e.to_string())),
            };
            let name = client.document_name(collection.as_str(), id(record));
            Ok(Write::Update(Document::from_json(name, &body)))
        })
        .collect()
}
