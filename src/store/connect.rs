use crate::Error;
use crate::records::*;
use crate::schema::*;
use tokio_postgres::Client;

/// Opens a client against `url` and spawns its connection task.
pub async fn connect(url: &str) -> Result<Client, Error> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(client)
}

/// Every `CREATE TABLE IF NOT EXISTS`, owners before the tables that
/// reference them.
pub fn creates() -> Vec<String> {
    vec![
        Game::creates(),
        Deal::creates(),
        DealPlayer::creates(),
        CallTrumpDecision::creates(),
        DiscardCardDecision::creates(),
        Trick::creates(),
        PlayCardDecision::creates(),
        GamePlayer::creates(),
        DealDeckCard::creates(),
        DealKnownVoid::creates(),
        StartingHandCard::creates(),
        CallHandCard::creates(),
        CallValidDecision::creates(),
        CallPredictedPoints::creates(),
        DiscardHandCard::creates(),
        DiscardPredictedPoints::creates(),
        TrickCardPlayed::creates(),
        PlayHandCard::creates(),
        PlayPlayedCard::creates(),
        PlayValidCard::creates(),
        PlayKnownVoid::creates(),
        PlayAccountedCard::creates(),
        PlayPredictedPoints::creates(),
    ]
}

/// Creates all 23 tables if they are missing.
pub async fn migrate(client: &Client) -> Result<(), Error> {
    log::info!("creating tables");
    client.batch_execute(&creates().join("\n")).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owners_are_created_first() {
        let ddl = creates();
        assert_eq!(ddl.len(), 23);
        let position = |table: &str| {
            ddl.iter()
                .position(|s| s.starts_with(&format!("CREATE TABLE IF NOT EXISTS {} (", table)))
                .unwrap()
        };
        assert!(position(GAME) < position(DEAL));
        assert!(position(TRICK) < position(PLAY_CARD));
        assert!(position(PLAY_CARD) < position(PLAY_CARD_VOID));
        assert!(position(DEAL_PLAYER) < position(STARTING_HAND_CARD));
    }

    #[test]
    fn leaf_tables_carry_composite_keys() {
        let ddl = TrickCardPlayed::creates();
        assert!(ddl.contains("PRIMARY KEY (trick_id, play_order)"));
        assert!(ddl.contains("FOREIGN KEY (trick_id) REFERENCES trick (id) ON DELETE CASCADE"));
        let ddl = DealKnownVoid::creates();
        assert!(ddl.contains("PRIMARY KEY (deal_id, seat, suit)"));
    }
}
