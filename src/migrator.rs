use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_customer_table::Migration),
            Box::new(m20240101_000002_create_products_table::Migration),
            Box::new(m20240101_000003_create_orders_table::Migration),
            Box::new(m20240101_000004_create_order_products_table::Migration),
        ]
    }
}

// Every table is created with IF NOT EXISTS; an existing table is never altered.

mod m20240101_000001_create_customer_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_customer_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customer::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customer::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Customer::Name).string_len(225).not_null())
                        .col(ColumnDef::new(Customer::Email).string_len(225).null())
                        .col(ColumnDef::new(Customer::Address).string_len(225).null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customer::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Customer {
        #[sea_orm(iden = "Customer")]
        Table,
        Id,
        Name,
        Email,
        Address,
    }
}

mod m20240101_000002_create_products_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Products::ProductName)
                                .string_len(225)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::Price).double().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Products {
        Table,
        Id,
        ProductName,
        Price,
    }
}

mod m20240101_000003_create_orders_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Orders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Orders::OrderDate).date().not_null())
                        .col(ColumnDef::new(Orders::CustomerId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer_id")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customer::Table, Customer::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_customer_id")
                        .table(Orders::Table)
                        .col(Orders::CustomerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Orders {
        Table,
        Id,
        OrderDate,
        CustomerId,
    }

    #[derive(DeriveIden)]
    pub enum Customer {
        #[sea_orm(iden = "Customer")]
        Table,
        Id,
    }
}

mod m20240101_000004_create_order_products_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_order_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // The composite key is what keeps a pair from being attached twice
            manager
                .create_table(
                    Table::create()
                        .table(OrderProducts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(OrderProducts::OrderId).integer().not_null())
                        .col(
                            ColumnDef::new(OrderProducts::ProductId)
                                .integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(OrderProducts::OrderId)
                                .col(OrderProducts::ProductId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_products_order_id")
                                .from(OrderProducts::Table, OrderProducts::OrderId)
                                .to(Orders::Table, Orders::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_products_product_id")
                                .from(OrderProducts::Table, OrderProducts::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_products_product_id")
                        .table(OrderProducts::Table)
                        .col(OrderProducts::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderProducts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum OrderProducts {
        #[sea_orm(iden = "Order_Products")]
        Table,
        OrderId,
        ProductId,
    }

    #[derive(DeriveIden)]
    pub enum Orders {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    pub enum Products {
        Table,
        Id,
    }
}
