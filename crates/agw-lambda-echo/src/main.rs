//! AWS Lambda function echoing API Gateway proxy requests.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    agw_lambda_echo::run().await
}
