use std::panic;

use futures::Future;
use sqlite::TestDb;

pub struct TestHelper {
    pub db: TestDb,
}

pub async fn test<T, Fut>(test: T)
where
    T: FnOnce(TestHelper) -> Fut + panic::UnwindSafe + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let db = TestDb::new().await;
    let helper = TestHelper { db: db.clone() };

    test(helper).await;

    db.db.close().await;
}
