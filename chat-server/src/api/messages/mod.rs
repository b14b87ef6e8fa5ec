pub mod create_message_request;
pub mod list_messages_query;
pub mod message_dto;
pub mod message_list_response;
pub mod message_response;
pub mod messages;
