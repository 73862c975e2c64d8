mod lazy_transcription_engine_test;
mod symphonia_probe_test;
