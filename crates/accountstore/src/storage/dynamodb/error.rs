//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `accountstore_core::storage`.

use std::fmt::Debug;

use accountstore_core::storage::RepositoryError;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;

const TABLE: &str = "Table";

fn table_not_found(table_name: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: TABLE,
        id: table_name.to_string(),
    }
}

/// Maps failures that never reached the service (dispatch, timeout).
///
/// Any other error is handed back for service-specific mapping.
fn map_transport_error<E, R>(
    err: SdkError<E, R>,
    operation: &str,
) -> Result<SdkError<E, R>, RepositoryError>
where
    E: std::error::Error + 'static,
    R: Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            Err(RepositoryError::ConnectionFailed(format!(
                "{} failed: {}",
                operation,
                DisplayErrorContext(err)
            )))
        }
        err => Ok(err),
    }
}

/// Map a ListTables SDK error to RepositoryError.
pub fn map_list_tables_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListTablesError, R>,
) -> RepositoryError {
    let err = match map_transport_error(err, "ListTables") {
        Ok(err) => err,
        Err(mapped) => return mapped,
    };
    match err.into_service_error() {
        ListTablesError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("ListTables failed: {:?}", err)),
    }
}

/// Map a CreateTable SDK error to RepositoryError.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
    table_name: &str,
) -> RepositoryError {
    let err = match map_transport_error(err, "CreateTable") {
        Ok(err) => err,
        Err(mapped) => return mapped,
    };
    match err.into_service_error() {
        CreateTableError::ResourceInUseException(_) => RepositoryError::AlreadyExists {
            entity_type: TABLE,
            id: table_name.to_string(),
        },
        CreateTableError::LimitExceededException(_) => {
            RepositoryError::Throttled("Table operation limit exceeded, please retry".to_string())
        }
        CreateTableError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("CreateTable failed: {:?}", err)),
    }
}

/// Map a DescribeTable SDK error to RepositoryError.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
    table_name: &str,
) -> RepositoryError {
    let err = match map_transport_error(err, "DescribeTable") {
        Ok(err) => err,
        Err(mapped) => return mapped,
    };
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => table_not_found(table_name),
        DescribeTableError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("DescribeTable failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> RepositoryError {
    let err = match map_transport_error(err, "PutItem") {
        Ok(err) => err,
        Err(mapped) => return mapped,
    };
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Throttled("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
    table_name: &str,
) -> RepositoryError {
    let err = match map_transport_error(err, "Query") {
        Ok(err) => err,
        Err(mapped) => return mapped,
    };
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => table_not_found(table_name),
        QueryError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Throttled("Throughput exceeded, please retry".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded, please retry".to_string())
        }
        QueryError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to RepositoryError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table_name: &str,
) -> RepositoryError {
    let err = match map_transport_error(err, "Scan") {
        Ok(err) => err,
        Err(mapped) => return mapped,
    };
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => table_not_found(table_name),
        ScanError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Throttled("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table_name: &str,
) -> RepositoryError {
    let err = match map_transport_error(err, "DeleteItem") {
        Ok(err) => err,
        Err(mapped) => return mapped,
    };
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Throttled("Throughput exceeded, please retry".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            RepositoryError::Throttled("Request limit exceeded, please retry".to_string())
        }
        DeleteItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("DeleteItem failed: {:?}", err)),
    }
}
