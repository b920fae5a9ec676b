use urlencoding::encode;

pub fn inference(inference_id: &str) -> String {
    format!("/observability/inferences/{}", encode(inference_id))
}

pub fn episode(episode_id: &str) -> String {
    format!("/observability/episodes/{}", encode(episode_id))
}

pub fn function(function_name: &str) -> String {
    format!("/observability/functions/{}", encode(function_name))
}

pub fn variant(function_name: &str, variant_name: &str) -> String {
    format!(
        "/observability/functions/{}/variants/{}",
        encode(function_name),
        encode(variant_name)
    )
}

pub fn evaluation(evaluation_name: &str) -> String {
    format!("/evaluations/{}", encode(evaluation_name))
}

/// Evaluation page filtered down to a single run
pub fn evaluation_run(evaluation_name: &str, run_id: &str) -> String {
    format!(
        "/evaluations/{}?evaluation_run_ids={}",
        encode(evaluation_name),
        encode(run_id)
    )
}

pub fn dataset(dataset_name: &str) -> String {
    format!("/datasets/{}", encode(dataset_name))
}

pub fn datapoint(dataset_name: &str, datapoint_id: &str) -> String {
    format!(
        "/datasets/{}/datapoint/{}",
        encode(dataset_name),
        encode(datapoint_id)
    )
}
