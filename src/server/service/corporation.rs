use sea_orm::DatabaseConnection;

use crate::server::{data::corporation::CorporationRepository, error::Error};

/// Service for corporations stored for director management.
pub struct CorporationService<'a> {
    db: &'a DatabaseConnection,
    esi_client: &'a eve_esi::Client,
}

impl<'a> CorporationService<'a> {
    /// Creates a new instance of [`CorporationService`]
    pub fn new(db: &'a DatabaseConnection, esi_client: &'a eve_esi::Client) -> Self {
        Self { db, esi_client }
    }

    /// Returns the stored corporation, fetching it from EVE Online's ESI if it isn't stored yet
    pub async fn get_or_create_corporation(
        &self,
        corporation_id: i64,
    ) -> Result<entity::eve_corporation::Model, Error> {
        let corporation_repo = CorporationRepository::new(self.db);

        if let Some(corporation) = corporation_repo
            .find_by_corporation_id(corporation_id)
            .await?
        {
            return Ok(corporation);
        }

        let corporation = self
            .esi_client
            .corporation()
            .get_corporation_information(corporation_id)
            .await?;

        Ok(corporation_repo.upsert(corporation_id, corporation).await?)
    }
}

#[cfg(test)]
mod tests {
    use warden_test_utils::prelude::*;

    use crate::server::{error::Error, service::corporation::CorporationService};

    /// Expect a stored corporation to be returned without an ESI request
    #[tokio::test]
    async fn returns_stored_corporation() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_director_tables()
            .with_mock_corporation(98000001)
            .with_corporation_endpoint(98000001, factory::mock_corporation(None, None), 0)
            .build()
            .await?;

        let corporation_service = CorporationService::new(&test.db, &test.esi_client);
        let result = corporation_service.get_or_create_corporation(98000001).await;

        assert!(result.is_ok());
        test.assert_mocks();

        Ok(())
    }

    /// Expect a missing corporation to be fetched from ESI and stored
    #[tokio::test]
    async fn fetches_missing_corporation() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_director_tables()
            .with_corporation_endpoint(98000001, factory::mock_corporation(None, None), 1)
            .build()
            .await?;

        let corporation_service = CorporationService::new(&test.db, &test.esi_client);
        let result = corporation_service.get_or_create_corporation(98000001).await;

        assert!(result.is_ok(), "Error: {:?}", result);
        let corporation = result.unwrap();
        assert_eq!(corporation.corporation_id, 98000001);
        assert_eq!(corporation.ticker, "F4LL.");
        test.assert_mocks();

        Ok(())
    }

    /// Expect an ESI error when the corporation endpoint is unavailable
    #[tokio::test]
    async fn fails_when_esi_unavailable() -> Result<(), TestError> {
        let test = TestBuilder::new().with_director_tables().build().await?;

        let corporation_service = CorporationService::new(&test.db, &test.esi_client);
        let result = corporation_service.get_or_create_corporation(98000001).await;

        assert!(matches!(result, Err(Error::EsiError(_))));

        Ok(())
    }
}
