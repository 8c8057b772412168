use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use user_registration::domain::ports::ConfigProvider;
use user_registration::utils::{
    logger::{self, TracingLogger},
    validation::Validate,
};
use user_registration::{
    DynamoUserRepository, HttpResponse, LambdaConfig, RegistrationEvent, RegistrationService,
};

type Service = RegistrationService<DynamoUserRepository, user_registration::BcryptHasher>;

async fn function_handler(
    service: Arc<Service>,
    event: LambdaEvent<RegistrationEvent>,
) -> Result<HttpResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Processing user registration request");
    let response = service.handle(event.payload).await;
    Ok(response.into_http())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let lambda_config = LambdaConfig::from_env()?;
    logger::init_lambda_logger(lambda_config.log_level(), lambda_config.debug());
    lambda_config.validate()?;

    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &lambda_config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    let sdk_config = loader.load().await;
    let client = DynamoClient::new(&sdk_config);

    let repository = DynamoUserRepository::new(client, lambda_config.users_table().to_string());
    let service: Arc<Service> = Arc::new(RegistrationService::from_config(
        repository,
        &lambda_config,
        Arc::new(TracingLogger::new(lambda_config.debug())),
    ));

    tracing::info!(table = %lambda_config.users_table(), "Registration handler ready");

    run(service_fn(move |event: LambdaEvent<RegistrationEvent>| {
        let service = Arc::clone(&service);
        async move { function_handler(service, event).await }
    }))
    .await
}
