pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_tables;
mod m20250301_000002_create_room_tables;
mod m20250301_000003_create_it_assets_table;
mod m20250301_000004_create_handover_tables;
mod m20250301_000005_create_operations_tables;
mod m20250301_000006_create_joiner_leaver_tables;
mod m20250301_000007_create_audit_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_tables::Migration),
            Box::new(m20250301_000002_create_room_tables::Migration),
            Box::new(m20250301_000003_create_it_assets_table::Migration),
            Box::new(m20250301_000004_create_handover_tables::Migration),
            Box::new(m20250301_000005_create_operations_tables::Migration),
            Box::new(m20250301_000006_create_joiner_leaver_tables::Migration),
            Box::new(m20250301_000007_create_audit_tables::Migration),
        ]
    }
}
