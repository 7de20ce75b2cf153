pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_venue;
mod m20240101_000002_create_artist;
mod m20240101_000003_create_show;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_venue::Migration),
            Box::new(m20240101_000002_create_artist::Migration),
            Box::new(m20240101_000003_create_show::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_by_name() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "m20240101_000001_create_venue",
                "m20240101_000002_create_artist",
                "m20240101_000003_create_show",
            ]
        );
    }
}
