use hitbenchlib::engine::io::StoreManager;
use hitbenchlib::engine::Engine;

pub fn _create_engine() -> Engine {
    Engine::new(StoreManager::new())
}

/// Inserts one row into the built-in hits table through the SQL layer.
pub async fn _insert_hit(
    engine: &mut Engine,
    counter: u32,
    phrase: Option<&str>,
    color: &str,
    country: &str,
    language: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let phrase = match phrase {
        Some(p) => format!("'{}'", p),
        None => "null".to_string(),
    };
    let insert = format!(
        "insert into hits (CounterID, SearchPhrase, IsMobile, MobilePhone, HitColor, BrowserCountry, BrowserLanguage) values({}, {}, false, 0, '{}', '{}', '{}')",
        counter, phrase, color, country, language
    );
    engine.process_query(insert).await?;
    Ok(())
}
