use super::Query;
use crate::Result;

/// Largest skip a batch may carry; SQL integers are signed 64-bit.
const MAX_SKIP: u64 = i64::MAX as u64;

impl Query {
    /// Splits the rows in scope into consecutive sub-queries of at most
    /// `amount` rows each.
    ///
    /// The rows are counted once; batch `i` skips `skip + i * amount` rows
    /// and the last batch is limited to the remainder. A zero `amount` or a
    /// skip outside the SQL integer range yields no batches.
    pub async fn in_batches_of(&self, amount: u64) -> Result<Vec<Query>> {
        if amount == 0 {
            tracing::warn!(table = self.model.table_name(), "batch size of zero");
            return Ok(vec![]);
        }

        let count = self.count().await?;
        Ok(self.batches(count, amount))
    }

    pub(super) fn batches(&self, count: u64, amount: u64) -> Vec<Query> {
        let batch_count = count.div_ceil(amount);
        let base = self.scope.skip().unwrap_or(0);

        let batches = (0..batch_count)
            .map(|index| {
                let offset = index * amount;
                let skip = base.checked_add(offset).filter(|skip| *skip <= MAX_SKIP)?;
                let limit = amount.min(count - offset);

                Some(self.skip_by(skip).limit_by(limit))
            })
            .collect::<Option<Vec<_>>>();

        match batches {
            Some(batches) => {
                tracing::trace!(
                    table = self.model.table_name(),
                    count,
                    batches = batches.len(),
                    "split scope into batches"
                );
                batches
            }
            None => {
                tracing::warn!(
                    table = self.model.table_name(),
                    count,
                    amount,
                    "batch skip out of range"
                );
                vec![]
            }
        }
    }
}
