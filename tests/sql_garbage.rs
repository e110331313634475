mod common;

#[tokio::test]
async fn garbage_input_errors_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = common::_create_engine();

    for garbage in [
        "hello world",
        "select",
        "select from",
        "select count( from hits",
        "insert into",
        "create table",
        "select count(distinct SearchPhrase) from hits limit",
        "select count(distinct SearchPhrase) from hits; drop table hits",
    ] {
        let res = engine.process_query(garbage.to_string()).await;
        assert!(res.is_err(), "Expected {} to be rejected", garbage);
    }

    Ok(())
}

#[tokio::test]
async fn errors_do_not_poison_the_engine() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = common::_create_engine();

    assert!(engine.process_query("not sql".to_string()).await.is_err());

    //The engine keeps serving after a bad statement
    let result = engine
        .process_query("select count(*) from hits".to_string())
        .await?;
    assert_eq!(result.rows.len(), 1);

    Ok(())
}
