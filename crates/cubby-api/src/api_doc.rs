//! OpenAPI document assembly.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cubby Object Storage Gateway",
        description = "HTTP gateway for S3-style bucket and object lifecycle management"
    ),
    paths(
        crate::handlers::buckets::create_bucket,
        crate::handlers::buckets::list_buckets,
        crate::handlers::buckets::bucket_exists,
        crate::handlers::buckets::delete_bucket,
        crate::handlers::objects::upload_file,
        crate::handlers::objects::file_exists,
        crate::handlers::objects::get_file,
        crate::handlers::objects::delete_file,
        crate::handlers::objects::delete_files,
        crate::handlers::objects::list_files,
        crate::handlers::objects::copy_file,
        crate::handlers::multipart::initiate_multipart_upload,
        crate::handlers::multipart::upload_part,
        crate::handlers::multipart::complete_multipart_upload,
        crate::handlers::multipart::abort_multipart_upload,
        crate::handlers::presign::presign,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::handlers::MessageResponse,
        crate::handlers::ExistsResponse,
        crate::handlers::buckets::BucketRequest,
        crate::handlers::buckets::BucketListResponse,
        crate::handlers::objects::ObjectRequest,
        crate::handlers::objects::BatchDeleteRequest,
        crate::handlers::objects::CopyRequest,
        crate::handlers::objects::FileListResponse,
        crate::handlers::multipart::InitiateRequest,
        crate::handlers::multipart::InitiateResponse,
        crate::handlers::multipart::UploadPartRequest,
        crate::handlers::multipart::UploadPartResponse,
        crate::handlers::multipart::CompleteRequest,
        crate::handlers::multipart::AbortRequest,
        crate::handlers::presign::PresignResponse,
    )),
    tags(
        (name = "buckets", description = "Bucket lifecycle"),
        (name = "files", description = "Object lifecycle"),
        (name = "multipart", description = "Multipart upload orchestration"),
        (name = "presign", description = "Presigned URL generation")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
