//! Schema PostgreSQL
//!
//! Sentencias idempotentes que se aplican al arrancar cuando AUTO_MIGRATE
//! está activo. Una sentencia por consulta.

pub const OPEN_SESSION_CONSTRAINT: &str = "uq_open_session_per_plate";
pub const SESSION_TOKEN_CONSTRAINT: &str = "vehicle_checkins_token_key";
pub const USER_EMAIL_CONSTRAINT: &str = "users_email_key";

pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id UUID PRIMARY KEY,
        parking_name TEXT NOT NULL,
        address TEXT NOT NULL,
        phone TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        full_name TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL,
        permissions TEXT[] NOT NULL DEFAULT '{}',
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT users_email_key UNIQUE (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pricing_tables (
        account_id UUID PRIMARY KEY REFERENCES accounts(id) ON DELETE CASCADE,
        daily_rates JSONB NOT NULL DEFAULT '{}',
        monthly_rates JSONB NOT NULL DEFAULT '{}',
        pricing_mode TEXT NOT NULL DEFAULT 'perDay',
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehicle_checkins (
        id UUID PRIMARY KEY,
        token TEXT NOT NULL,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        vehicle_number TEXT NOT NULL,
        vehicle_type TEXT NOT NULL,
        entry_time TIMESTAMPTZ NOT NULL,
        exit_time TIMESTAMPTZ,
        rate NUMERIC,
        prepaid_units INTEGER NOT NULL DEFAULT 0,
        prepaid_amount NUMERIC NOT NULL DEFAULT 0,
        total_amount NUMERIC,
        duration_label TEXT,
        checked_out BOOLEAN NOT NULL DEFAULT FALSE,
        entry_by UUID NOT NULL,
        exit_by UUID,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT vehicle_checkins_token_key UNIQUE (token)
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uq_open_session_per_plate
        ON vehicle_checkins (account_id, vehicle_number)
        WHERE NOT checked_out
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_checkins_account_entry
        ON vehicle_checkins (account_id, entry_time DESC)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS monthly_passes (
        id UUID PRIMARY KEY,
        account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
        vehicle_number TEXT NOT NULL,
        vehicle_type TEXT NOT NULL,
        owner_name TEXT NOT NULL,
        owner_phone TEXT,
        months INTEGER NOT NULL,
        amount NUMERIC NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_by UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_passes_account_plate
        ON monthly_passes (account_id, vehicle_number)
    "#,
];
