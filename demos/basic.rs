use sproc_call::{
    call, call_string, BoxError, BufferedResultSets, Param, QueryResult, SprocError, Value,
};

fn main() -> anyhow::Result<()> {
    let mut user_id: Option<i64> = None;
    let mut created: Option<bool> = None;

    println!(
        "{}",
        call_string(
            "upsert_user",
            &[
                Param::input("o'Brien"),
                Param::out(&mut user_id),
                Param::out(&mut created),
            ],
        )?
    );

    // Stand-in for a driver that runs multi-statement text and buffers
    // every result set.
    let mut connection = |sql: &str| {
        println!("-> {sql}");
        Ok::<_, BoxError>(BufferedResultSets::new(vec![
            QueryResult::new(
                ["id", "name"],
                vec![vec![Value::Int(7), Value::text("o'Brien")]],
            ),
            QueryResult::new(["@1", "@2"], vec![vec![Value::Int(7), Value::Int(0)]]),
        ]))
    };

    call(
        &mut connection,
        |index, set| {
            let columns = set.columns()?;
            for row in set.collect_rows()? {
                println!("result set {index}: {columns:?} {row:?}");
            }
            Ok::<_, SprocError>(())
        },
        "upsert_user",
        vec![
            Param::input("o'Brien"),
            Param::out(&mut user_id),
            Param::out(&mut created),
        ],
    )?;

    println!("user_id={user_id:?} created={created:?}");
    Ok(())
}
