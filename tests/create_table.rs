mod common;

use hitbenchlib::engine::objects::types::BaseSqlTypes;
use hitbenchlib::engine::objects::SqlTuple;

#[tokio::test]
async fn create_insert_select_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = common::_create_engine();

    engine
        .process_query(
            "create table phrases (phrase text, hits_seen integer not null)".to_string(),
        )
        .await?;
    engine
        .process_query("insert into phrases values('rain radar', 12)".to_string())
        .await?;
    engine
        .process_query("insert into phrases (hits_seen, phrase) values(3, null)".to_string())
        .await?;

    let result = engine
        .process_query("select phrase, hits_seen from phrases".to_string())
        .await?;

    assert_eq!(
        result.columns,
        vec!["phrase".to_string(), "hits_seen".to_string()]
    );
    assert_eq!(
        result.rows,
        vec![
            SqlTuple(vec![
                Some(BaseSqlTypes::Text("rain radar".to_string())),
                Some(BaseSqlTypes::Integer(12)),
            ]),
            SqlTuple(vec![None, Some(BaseSqlTypes::Integer(3))]),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn aggregates_work_on_created_tables() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = common::_create_engine();

    engine
        .process_query("create table phrases (phrase text)".to_string())
        .await?;
    for phrase in ["a", "a", "b"] {
        engine
            .process_query(format!("insert into phrases values('{}')", phrase))
            .await?;
    }

    let result = engine
        .process_query("select count(distinct phrase) from phrases".to_string())
        .await?;

    assert_eq!(
        result.rows,
        vec![SqlTuple(vec![Some(BaseSqlTypes::Integer(2))])]
    );

    Ok(())
}

#[tokio::test]
async fn duplicate_table_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = common::_create_engine();

    engine
        .process_query("create table phrases (phrase text)".to_string())
        .await?;
    let res = engine
        .process_query("create table phrases (phrase text)".to_string())
        .await;
    assert!(res.is_err());

    //Shadowing a built-in is not allowed either
    let res = engine
        .process_query("create table hits (foo text)".to_string())
        .await;
    assert!(res.is_err());

    Ok(())
}

#[tokio::test]
async fn null_violations_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = common::_create_engine();

    engine
        .process_query("create table phrases (phrase text not null)".to_string())
        .await?;

    let res = engine
        .process_query("insert into phrases values(null)".to_string())
        .await;
    assert!(res.is_err());

    //The failed insert left nothing behind
    let result = engine
        .process_query("select count(*) from phrases".to_string())
        .await?;
    assert_eq!(
        result.rows,
        vec![SqlTuple(vec![Some(BaseSqlTypes::Integer(0))])]
    );

    Ok(())
}
