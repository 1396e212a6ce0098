use super::audit;
use crate::{
    Db,
    types::{DateTime, ProductId, ResourceRow, SupplierId},
};
use plm_core::{
    models::{ProductData, Record},
    ports::ProductRepository,
};

type Data = ProductData<SupplierId, DateTime>;
type Row = ResourceRow<ProductId, Data>;

impl ProductRepository for Db {
    async fn list_products(&self) -> Result<Vec<Record<ProductId, DateTime, Data>>, Self::Error> {
        let rows = sqlx::query_as::<_, Row>(
            r#"
            select
                id,
                json(data) as data,
                created_at,
                updated_at
            from
                product
            order by
                rowid
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> Result<Option<Record<ProductId, DateTime, Data>>, Self::Error> {
        let row = sqlx::query_as::<_, Row>(
            r#"
            select
                id,
                json(data) as data,
                created_at,
                updated_at
            from
                product
            where
                id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create_product(
        &self,
        product_id: Self::ProductId,
        data: Data,
        as_of: Self::DateTime,
    ) -> Result<Record<ProductId, DateTime, Data>, Self::Error> {
        let details = format!("Created product {} ({})", data.name, data.sku);
        let sku = data.sku.clone();
        let data = sqlx::types::Json(data);

        let mut tx = self.writer.begin().await?;
        // a duplicate sku fails here with a unique violation
        let row = sqlx::query_as::<_, Row>(
            r#"
            insert into
                product (id, sku, data, created_at, updated_at)
            values
                ($1, $2, jsonb($3), $4, $4)
            returning
                id,
                json(data) as data,
                created_at,
                updated_at
            "#,
        )
        .bind(product_id)
        .bind(sku)
        .bind(data)
        .bind(as_of)
        .fetch_one(&mut *tx)
        .await?;
        audit::append(
            &mut tx,
            "CREATE_PRODUCT".to_string(),
            "product",
            product_id.to_string(),
            details,
            as_of,
        )
        .await?;
        tx.commit().await?;

        Ok(row.into())
    }

    async fn update_product(
        &self,
        product_id: Self::ProductId,
        data: Data,
        as_of: Self::DateTime,
    ) -> Result<Option<Record<ProductId, DateTime, Data>>, Self::Error> {
        let details = format!("Updated product {} ({})", data.name, data.sku);
        let sku = data.sku.clone();
        let data = sqlx::types::Json(data);

        let mut tx = self.writer.begin().await?;
        let Some(row) = sqlx::query_as::<_, Row>(
            r#"
            update
                product
            set
                sku = $2,
                data = jsonb($3),
                updated_at = $4
            where
                id = $1
            returning
                id,
                json(data) as data,
                created_at,
                updated_at
            "#,
        )
        .bind(product_id)
        .bind(sku)
        .bind(data)
        .bind(as_of)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };
        audit::append(
            &mut tx,
            "UPDATE_PRODUCT".to_string(),
            "product",
            product_id.to_string(),
            details,
            as_of,
        )
        .await?;
        tx.commit().await?;

        Ok(Some(row.into()))
    }

    async fn delete_product(
        &self,
        product_id: Self::ProductId,
        as_of: Self::DateTime,
    ) -> Result<bool, Self::Error> {
        let mut tx = self.writer.begin().await?;
        // BOMs that reference the product keep their components; costing
        // treats the now-missing product as contributing nothing
        let sku = sqlx::query_scalar::<_, String>(
            r#"
            delete from
                product
            where
                id = $1
            returning
                sku
            "#,
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(sku) = sku else {
            return Ok(false);
        };
        audit::append(
            &mut tx,
            "DELETE_PRODUCT".to_string(),
            "product",
            product_id.to_string(),
            format!("Deleted product {sku}"),
            as_of,
        )
        .await?;
        tx.commit().await?;

        Ok(true)
    }
}
