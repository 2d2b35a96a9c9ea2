use blogly::BloglyConfig;

#[rocket::launch]
fn rocket() -> _ {
    dotenv::dotenv().ok();
    blogly::build(&BloglyConfig::from_env())
}
