//! Cost Explorer and MSK implementation of [`ControlPlane`].
//!
//! Clients are built per invocation with SDK retries pinned to one attempt,
//! so a transient backend failure reaches the caller as an envelope error.

use std::collections::{BTreeMap, HashMap};

use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_costexplorer::error::DisplayErrorContext;
use aws_sdk_costexplorer::operation::get_cost_and_usage::GetCostAndUsageOutput;
use aws_sdk_costexplorer::operation::list_cost_allocation_tags::ListCostAllocationTagsOutput;
use aws_sdk_costexplorer::operation::update_cost_allocation_tags_status::UpdateCostAllocationTagsStatusOutput;
use aws_sdk_costexplorer::types as ce;
use aws_sdk_kafka::operation::list_tags_for_resource::ListTagsForResourceOutput;
use cost_gateway_core::error::ServiceError;
use cost_gateway_core::operations::{
    CostAllocationTagQuery, CostAllocationTagStatusUpdate, CostAndUsageQuery, DateRange,
    GroupDimension, Operation, ResourceTagsQuery, TagFilter, TagResourceRequest,
};
use cost_gateway_core::outputs::{
    CostAllocationTagListing, CostAllocationTagUpdateError, CostAllocationTagView,
    CostAllocationTagsStatusUpdate, CostAndUsageReport, CostGroup, DimensionValueAttributes,
    GroupDefinitionView, MetricAmount, OperationOutput, ResourceTagged, ResourceTags,
    ResultByTimeView,
};

use crate::adapters::control_plane::ControlPlane;
use crate::config::ControlPlaneConfig;

pub struct AwsControlPlane {
    cost_explorer: aws_sdk_costexplorer::Client,
    kafka: aws_sdk_kafka::Client,
}

impl AwsControlPlane {
    pub async fn load(config: &ControlPlaneConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(RetryConfig::standard().with_max_attempts(1))
            .load()
            .await;

        let mut cost_explorer = aws_sdk_costexplorer::config::Builder::from(&sdk_config);
        if let Some(url) = &config.cost_explorer_endpoint {
            cost_explorer = cost_explorer.endpoint_url(url);
        }

        let mut kafka = aws_sdk_kafka::config::Builder::from(&sdk_config);
        if let Some(url) = &config.kafka_endpoint {
            kafka = kafka.endpoint_url(url);
        }

        Self {
            cost_explorer: aws_sdk_costexplorer::Client::from_conf(cost_explorer.build()),
            kafka: aws_sdk_kafka::Client::from_conf(kafka.build()),
        }
    }

    async fn execute(&self, operation: &Operation) -> Result<OperationOutput, ServiceError> {
        match operation {
            Operation::CostAndUsage(query) => self
                .get_cost_and_usage(query)
                .await
                .map(OperationOutput::CostAndUsage),
            Operation::ListTagsForResource(query) => self
                .list_tags_for_resource(query)
                .await
                .map(OperationOutput::ResourceTags),
            Operation::TagResource(request) => self
                .tag_resource(request)
                .await
                .map(OperationOutput::ResourceTagged),
            Operation::ListCostAllocationTags(query) => self
                .list_cost_allocation_tags(query)
                .await
                .map(OperationOutput::CostAllocationTags),
            Operation::UpdateCostAllocationTagsStatus(update) => self
                .update_cost_allocation_tags_status(update)
                .await
                .map(OperationOutput::CostAllocationTagsStatusUpdated),
        }
    }

    async fn get_cost_and_usage(
        &self,
        query: &CostAndUsageQuery,
    ) -> Result<CostAndUsageReport, ServiceError> {
        let time_period = ce::DateInterval::builder()
            .start(&query.time_period.start)
            .end(&query.time_period.end)
            .build()
            .map_err(|error| ServiceError::new(format!("invalid time period: {error}")))?;

        let output = self
            .cost_explorer
            .get_cost_and_usage()
            .time_period(time_period)
            .granularity(ce::Granularity::from(query.granularity.as_str()))
            .set_metrics(Some(query.metrics.clone()))
            .filter(tag_filter_expression(&query.filter))
            .set_group_by(Some(
                query.group_by.iter().copied().map(group_definition).collect(),
            ))
            .send()
            .await
            .map_err(service_error)?;

        Ok(cost_report_from(&output))
    }

    async fn list_tags_for_resource(
        &self,
        query: &ResourceTagsQuery,
    ) -> Result<ResourceTags, ServiceError> {
        let output = self
            .kafka
            .list_tags_for_resource()
            .resource_arn(&query.resource_arn)
            .send()
            .await
            .map_err(service_error)?;

        Ok(resource_tags_from(&output))
    }

    async fn tag_resource(
        &self,
        request: &TagResourceRequest,
    ) -> Result<ResourceTagged, ServiceError> {
        let tags: HashMap<String, String> = request
            .tags
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        self.kafka
            .tag_resource()
            .resource_arn(&request.resource_arn)
            .set_tags(Some(tags))
            .send()
            .await
            .map_err(service_error)?;

        Ok(ResourceTagged {})
    }

    async fn list_cost_allocation_tags(
        &self,
        query: &CostAllocationTagQuery,
    ) -> Result<CostAllocationTagListing, ServiceError> {
        let output = self
            .cost_explorer
            .list_cost_allocation_tags()
            .set_tag_keys(Some(query.tag_keys.clone()))
            .send()
            .await
            .map_err(service_error)?;

        Ok(cost_allocation_listing_from(&output))
    }

    async fn update_cost_allocation_tags_status(
        &self,
        update: &CostAllocationTagStatusUpdate,
    ) -> Result<CostAllocationTagsStatusUpdate, ServiceError> {
        let entry = ce::CostAllocationTagStatusEntry::builder()
            .tag_key(&update.tag_key)
            .status(ce::CostAllocationTagStatus::from(update.status.as_str()))
            .build()
            .map_err(|error| ServiceError::new(format!("invalid tag status entry: {error}")))?;

        let output = self
            .cost_explorer
            .update_cost_allocation_tags_status()
            .cost_allocation_tags_status(entry)
            .send()
            .await
            .map_err(service_error)?;

        Ok(status_update_from(&output))
    }
}

impl ControlPlane for AwsControlPlane {
    fn invoke(&self, operation: &Operation) -> Result<OperationOutput, ServiceError> {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(self.execute(operation))
        })
    }
}

fn service_error<E: std::error::Error>(error: E) -> ServiceError {
    ServiceError::new(DisplayErrorContext(error).to_string())
}

fn tag_filter_expression(filter: &TagFilter) -> ce::Expression {
    let tags = ce::TagValues::builder()
        .key(&filter.key)
        .set_values(Some(filter.values.clone()))
        .set_match_options(Some(
            filter
                .match_options
                .iter()
                .map(|option| ce::MatchOption::from(option.as_str()))
                .collect(),
        ))
        .build();

    ce::Expression::builder().tags(tags).build()
}

fn group_definition(dimension: GroupDimension) -> ce::GroupDefinition {
    ce::GroupDefinition::builder()
        .r#type(ce::GroupDefinitionType::Dimension)
        .key(dimension.as_str())
        .build()
}

pub fn cost_report_from(output: &GetCostAndUsageOutput) -> CostAndUsageReport {
    CostAndUsageReport {
        group_definitions: output
            .group_definitions()
            .iter()
            .map(|definition| GroupDefinitionView {
                key: definition.key().map(str::to_string),
                kind: definition.r#type().map(|kind| kind.as_str().to_string()),
            })
            .collect(),
        results_by_time: output
            .results_by_time()
            .iter()
            .map(result_by_time_from)
            .collect(),
        dimension_value_attributes: output
            .dimension_value_attributes()
            .iter()
            .map(|dimension| DimensionValueAttributes {
                value: dimension.value().map(str::to_string),
                attributes: dimension.attributes().map(sorted).unwrap_or_default(),
            })
            .collect(),
        next_page_token: output.next_page_token().map(str::to_string),
    }
}

fn result_by_time_from(result: &ce::ResultByTime) -> ResultByTimeView {
    ResultByTimeView {
        time_period: result.time_period().map(|period| DateRange {
            start: period.start().to_string(),
            end: period.end().to_string(),
        }),
        total: result.total().map(metric_amounts).unwrap_or_default(),
        groups: result
            .groups()
            .iter()
            .map(|group| CostGroup {
                keys: group.keys().to_vec(),
                metrics: group.metrics().map(metric_amounts).unwrap_or_default(),
            })
            .collect(),
        estimated: result.estimated(),
    }
}

fn metric_amounts(metrics: &HashMap<String, ce::MetricValue>) -> BTreeMap<String, MetricAmount> {
    metrics
        .iter()
        .map(|(name, value)| {
            (
                name.clone(),
                MetricAmount {
                    amount: value.amount().map(str::to_string),
                    unit: value.unit().map(str::to_string),
                },
            )
        })
        .collect()
}

fn sorted(values: &HashMap<String, String>) -> BTreeMap<String, String> {
    values
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

pub fn resource_tags_from(output: &ListTagsForResourceOutput) -> ResourceTags {
    ResourceTags {
        tags: output.tags().map(sorted).unwrap_or_default(),
    }
}

pub fn cost_allocation_listing_from(
    output: &ListCostAllocationTagsOutput,
) -> CostAllocationTagListing {
    CostAllocationTagListing {
        cost_allocation_tags: output
            .cost_allocation_tags()
            .iter()
            .map(|tag| CostAllocationTagView {
                tag_key: tag.tag_key().to_string(),
                kind: tag.r#type().as_str().to_string(),
                status: tag.status().as_str().to_string(),
                last_updated_date: tag.last_updated_date().map(str::to_string),
                last_used_date: tag.last_used_date().map(str::to_string),
            })
            .collect(),
        next_token: output.next_token().map(str::to_string),
    }
}

pub fn status_update_from(
    output: &UpdateCostAllocationTagsStatusOutput,
) -> CostAllocationTagsStatusUpdate {
    CostAllocationTagsStatusUpdate {
        errors: output
            .errors()
            .iter()
            .map(|error| CostAllocationTagUpdateError {
                tag_key: error.tag_key().map(str::to_string),
                code: error.code().map(str::to_string),
                message: error.message().map(str::to_string),
            })
            .collect(),
    }
}
