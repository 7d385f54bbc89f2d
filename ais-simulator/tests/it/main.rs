mod helper;
mod ingest;
mod settings;
mod streamer;
