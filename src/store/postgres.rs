use super::*;
use crate::Error;
use crate::cursor::*;
use crate::schema::Value;
use tokio_postgres::Transaction;
use tokio_postgres::binary_copy::BinaryCopyInWriter;
use tokio_postgres::types::ToSql;

fn as_sql<'v>(v: &'v Value<'_>) -> &'v (dyn ToSql + Sync) {
    v
}

#[async_trait::async_trait]
impl<'t> Store for Transaction<'t> {
    async fn insert(
        &mut self,
        table: &'static str,
        columns: &[&'static str],
        values: &[Value<'_>],
    ) -> Result<i64, Error> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            table,
            columns.join(", "),
            (1..=values.len())
                .map(|i| format!("${}", i))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let params = values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();
        let row = self.query_one(&sql, &params).await?;
        Ok(row.try_get::<_, i64>(0)?)
    }
    async fn copy<'a>(
        &mut self,
        table: &'static str,
        mapping: &[Mapping],
        source: &mut (dyn RowSource<'a> + 'a),
    ) -> Result<u64, Error> {
        let ordinals = mapping
            .iter()
            .map(|m| source.ordinal(m.source))
            .collect::<Result<Vec<_>, _>>()?;
        let types = ordinals
            .iter()
            .map(|i| source.column_type(*i).map(|kind| kind.pg()))
            .collect::<Result<Vec<_>, _>>()?;
        let sql = format!(
            "COPY {} ({}) FROM STDIN BINARY",
            table,
            mapping
                .iter()
                .map(|m| m.target)
                .collect::<Vec<_>>()
                .join(", ")
        );
        let sink = self.copy_in(&sql).await?;
        let writer = BinaryCopyInWriter::new(sink, &types);
        futures::pin_mut!(writer);
        // one buffer for the whole table; a dropped writer aborts the COPY
        let mut row = Vec::<Value<'a>>::with_capacity(ordinals.len());
        while source.advance() {
            row.clear();
            for i in ordinals.iter() {
                row.push(source.value(*i)?);
            }
            writer
                .as_mut()
                .write_raw(row.iter().map(as_sql))
                .await?;
        }
        Ok(writer.finish().await?)
    }
    async fn commit(self) -> Result<(), Error> {
        Ok(Transaction::commit(self).await?)
    }
    async fn rollback(self) -> Result<(), Error> {
        Ok(Transaction::rollback(self).await?)
    }
}
