use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    pubkey::Pubkey,
    system_instruction,
    sysvar::{rent::Rent, Sysvar},
};

use crate::constants::{FACTORY_SEED, POOL_CREATION_FEE, POOL_SEED};
use crate::error::PoolError;
use crate::instruction::PoolInstruction;
use crate::math;
use crate::pda::{
    find_factory_address, find_pool_address, get_pool_seeds, validate_lp_mint_properties,
    validate_lp_mint_zero_supply, validate_mint_basic, validate_pool_vault, validate_program_id,
    validate_rent_exemption, validate_token_account_basic,
};
use crate::state::{LiquidityPool, PoolFactory};

/// Processes instructions for the liquidity pool program.
pub struct Processor;
impl Processor {
    /// Main processing function dispatching to specific instruction handlers.
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instr_data: &[u8],
    ) -> ProgramResult {
        let instruction = PoolInstruction::try_from_slice(instr_data)
            .map_err(|_| PoolError::InvalidInstructionData)?;

        match instruction {
            PoolInstruction::InitializeFactory => {
                Self::process_initialize_factory(program_id, accounts)
            }
            PoolInstruction::CreatePool => Self::process_create_pool(program_id, accounts),
            PoolInstruction::AddLiquidity {
                amount_native,
                amount_token,
            } => Self::process_add_liquidity(program_id, accounts, amount_native, amount_token),
            PoolInstruction::RemoveLiquidity { amount_lp } => {
                Self::process_remove_liquidity(program_id, accounts, amount_lp)
            }
        }
    }

    fn process_initialize_factory(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
        msg!("Factory: process_initialize_factory entry");
        let acc_iter = &mut accounts.iter();
        let payer_acc = next_account_info(acc_iter)?; // 0
        let factory_acc = next_account_info(acc_iter)?; // 1
        let system_acc = next_account_info(acc_iter)?; // 2
        let rent_acc = next_account_info(acc_iter)?; // 3

        if !payer_acc.is_signer {
            msg!("Payer did not sign");
            return Err(PoolError::MissingRequiredSignature.into());
        }
        validate_program_id(system_acc, &solana_program::system_program::id())?;
        validate_program_id(rent_acc, &solana_program::sysvar::rent::id())?;
        let rent = Rent::from_account_info(rent_acc)?;

        let (expected_factory_pda, bump) = find_factory_address(program_id);
        if &expected_factory_pda != factory_acc.key {
            msg!(
                "Factory ERROR: Expected factory pda {}, got {}",
                expected_factory_pda,
                factory_acc.key
            );
            return Err(PoolError::IncorrectFactoryPda.into());
        }

        // At most one factory per deployment. An account already living at
        // the derived address carries lamports.
        if factory_acc.lamports() > 0 {
            msg!("Factory already initialized");
            return Err(PoolError::AlreadyInitialized.into());
        }

        let factory_state = PoolFactory {
            authority: *payer_acc.key,
            pools_count: 0,
            creation_fee: POOL_CREATION_FEE,
        };
        let factory_bytes = factory_state.try_to_vec()?;
        let factory_space = factory_bytes.len();
        let needed_lamports = rent.minimum_balance(factory_space);

        invoke_signed(
            &system_instruction::create_account(
                payer_acc.key,
                factory_acc.key,
                needed_lamports,
                factory_space as u64,
                program_id,
            ),
            &[payer_acc.clone(), factory_acc.clone(), system_acc.clone()],
            &[&[FACTORY_SEED, &[bump]]],
        )?;

        let mut factory_data_borrow = factory_acc.data.borrow_mut();
        factory_data_borrow.copy_from_slice(&factory_bytes);
        msg!("Factory: initialized with authority {}", payer_acc.key);

        Ok(())
    }

    fn process_create_pool(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
        msg!("Pool: process_create_pool entry");
        let acc_iter = &mut accounts.iter();
        let authority_acc = next_account_info(acc_iter)?; // 0
        let factory_acc = next_account_info(acc_iter)?; // 1
        let pool_state_acc = next_account_info(acc_iter)?; // 2
        let token_mint_acc = next_account_info(acc_iter)?; // 3
        let lp_mint_acc = next_account_info(acc_iter)?; // 4
        let vault_acc = next_account_info(acc_iter)?; // 5
        let system_acc = next_account_info(acc_iter)?; // 6
        let token_prog_acc = next_account_info(acc_iter)?; // 7
        let rent_acc = next_account_info(acc_iter)?; // 8

        if !authority_acc.is_signer {
            msg!("Authority did not sign");
            return Err(PoolError::MissingRequiredSignature.into());
        }
        validate_program_id(system_acc, &solana_program::system_program::id())?;
        validate_program_id(token_prog_acc, &spl_token::id())?;
        validate_program_id(rent_acc, &solana_program::sysvar::rent::id())?;
        let rent = Rent::from_account_info(rent_acc)?;

        // --- Factory authorization ---
        let (expected_factory_pda, _factory_bump) = find_factory_address(program_id);
        if &expected_factory_pda != factory_acc.key {
            return Err(PoolError::IncorrectFactoryPda.into());
        }
        let mut factory_state = PoolFactory::try_from_slice(&factory_acc.data.borrow())?;
        if &factory_state.authority != authority_acc.key {
            msg!(
                "Create Pool ERROR: caller {} is not the factory authority {}",
                authority_acc.key,
                factory_state.authority
            );
            return Err(PoolError::Unauthorized.into());
        }

        // --- Pool PDA derivation & one-pool-per-mint check ---
        let (expected_pool_pda, bump) = find_pool_address(program_id, token_mint_acc.key);
        if &expected_pool_pda != pool_state_acc.key {
            msg!(
                "Pool ERROR: Expected pool pda {}, got {}",
                expected_pool_pda,
                pool_state_acc.key
            );
            return Err(PoolError::IncorrectPoolPda.into());
        }
        if pool_state_acc.lamports() > 0 {
            msg!("Pool for mint {} already exists", token_mint_acc.key);
            return Err(PoolError::PoolAlreadyExists.into());
        }

        // --- Mint & vault validations ---
        let _token_mint_data = validate_mint_basic(token_mint_acc)?;
        validate_rent_exemption(token_mint_acc, &rent)?;

        // The LP mint is caller-supplied; it becomes this pool's issuance
        // line only if its authority is the pool PDA and nothing was minted.
        let lp_mint_data = validate_mint_basic(lp_mint_acc)?;
        validate_lp_mint_properties(&lp_mint_data, &expected_pool_pda)?;
        validate_lp_mint_zero_supply(&lp_mint_data)?;
        validate_rent_exemption(lp_mint_acc, &rent)?;

        validate_pool_vault(vault_acc, &expected_pool_pda, token_mint_acc.key)?;
        msg!("Create Pool: all account validations passed");

        // --- Creation fee, paid into the factory account ---
        let creation_fee = factory_state.creation_fee;
        if authority_acc.lamports() < creation_fee {
            return Err(PoolError::InsufficientCreationFee.into());
        }
        invoke(
            &system_instruction::transfer(authority_acc.key, factory_acc.key, creation_fee),
            &[
                authority_acc.clone(),
                factory_acc.clone(),
                system_acc.clone(),
            ],
        )?;

        // --- Account creation & state initialization ---
        let initial_pool_state = LiquidityPool {
            factory: *factory_acc.key,
            token_mint: *token_mint_acc.key,
            lp_mint: *lp_mint_acc.key,
            vault: *vault_acc.key,
            native_reserve: 0,
            token_reserve: 0,
            total_lp_supply: 0,
            bump,
        };
        let pool_bytes = initial_pool_state.try_to_vec()?;
        let pool_space = pool_bytes.len();
        let needed_lamports = rent.minimum_balance(pool_space);

        invoke_signed(
            &system_instruction::create_account(
                authority_acc.key,
                pool_state_acc.key,
                needed_lamports,
                pool_space as u64,
                program_id,
            ),
            &[
                authority_acc.clone(),
                pool_state_acc.clone(),
                system_acc.clone(),
            ],
            &[&[POOL_SEED, token_mint_acc.key.as_ref(), &[bump]]],
        )?;

        let mut pool_data_borrow = pool_state_acc.data.borrow_mut();
        pool_data_borrow.copy_from_slice(&pool_bytes);

        factory_state.pools_count = factory_state
            .pools_count
            .checked_add(1)
            .ok_or(PoolError::Overflow)?;
        factory_state.serialize(&mut &mut factory_acc.data.borrow_mut()[..])?;

        msg!("Pool created for mint {}", token_mint_acc.key);
        Ok(())
    }

    fn process_add_liquidity(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        amount_native: u64,
        amount_token: u64,
    ) -> ProgramResult {
        msg!("Pool AddLiq: Processing");
        let acc_iter = &mut accounts.iter();
        let user_acc = next_account_info(acc_iter)?; // 0
        let pool_state_acc = next_account_info(acc_iter)?; // 1
        let vault_acc = next_account_info(acc_iter)?; // 2
        let lp_mint_acc = next_account_info(acc_iter)?; // 3
        let user_token_acc = next_account_info(acc_iter)?; // 4
        let user_lp_acc = next_account_info(acc_iter)?; // 5
        let system_acc = next_account_info(acc_iter)?; // 6
        let token_prog_acc = next_account_info(acc_iter)?; // 7

        // --- Load state & basic checks ---
        if !user_acc.is_signer {
            return Err(PoolError::MissingRequiredSignature.into());
        }
        validate_program_id(system_acc, &solana_program::system_program::id())?;
        validate_program_id(token_prog_acc, &spl_token::id())?;
        let mut pool_data = LiquidityPool::try_from_slice(&pool_state_acc.data.borrow())?;

        // --- PDA re-derivation, never trust the supplied address ---
        let (expected_pda, _bump) = find_pool_address(program_id, &pool_data.token_mint);
        if &expected_pda != pool_state_acc.key {
            return Err(PoolError::IncorrectPoolPda.into());
        }

        // --- Account key checks vs pool state ---
        if vault_acc.key != &pool_data.vault {
            return Err(PoolError::VaultMismatch.into());
        }
        if lp_mint_acc.key != &pool_data.lp_mint {
            return Err(PoolError::LpMintMismatch.into());
        }

        if amount_native == 0 || amount_token == 0 {
            return Err(PoolError::ZeroAmount.into());
        }

        // --- Account data validations ---
        validate_pool_vault(vault_acc, &expected_pda, &pool_data.token_mint)?;
        let lp_mint_data = validate_mint_basic(lp_mint_acc)?;
        validate_lp_mint_properties(&lp_mint_data, &expected_pda)?;
        let _user_token_data =
            validate_token_account_basic(user_token_acc, user_acc.key, &pool_data.token_mint)?;
        let _user_lp_data =
            validate_token_account_basic(user_lp_acc, user_acc.key, &pool_data.lp_mint)?;

        // --- Liquidity math, before any ledger movement ---
        let minted = math::lp_tokens_for_deposit(
            pool_data.native_reserve,
            pool_data.token_reserve,
            pool_data.total_lp_supply,
            amount_native,
            amount_token,
        )?;
        msg!(
            "Pool AddLiq: depositing ({}, {}) mints {} LP units",
            amount_native,
            amount_token,
            minted
        );

        // Native leg: user -> pool PDA
        invoke(
            &system_instruction::transfer(user_acc.key, pool_state_acc.key, amount_native),
            &[user_acc.clone(), pool_state_acc.clone(), system_acc.clone()],
        )?;

        // Token leg: user -> vault
        let transfer_ix = spl_token::instruction::transfer(
            token_prog_acc.key,
            user_token_acc.key,
            vault_acc.key,
            user_acc.key,
            &[],
            amount_token,
        )?;
        invoke(
            &transfer_ix,
            &[
                user_token_acc.clone(),
                vault_acc.clone(),
                user_acc.clone(),
                token_prog_acc.clone(),
            ],
        )?;

        // Credit the depositor's claim, signed as the pool PDA
        let bump_arr = [pool_data.bump];
        let sign_seeds = get_pool_seeds(&pool_data.token_mint, &bump_arr);
        let mint_ix = spl_token::instruction::mint_to(
            token_prog_acc.key,
            &pool_data.lp_mint,
            user_lp_acc.key,
            pool_state_acc.key,
            &[],
            minted,
        )?;
        invoke_signed(
            &mint_ix,
            &[
                lp_mint_acc.clone(),
                user_lp_acc.clone(),
                pool_state_acc.clone(),
                token_prog_acc.clone(),
            ],
            &[&sign_seeds],
        )?;

        // --- Counter commit, after every ledger leg succeeded ---
        pool_data.native_reserve = pool_data
            .native_reserve
            .checked_add(amount_native)
            .ok_or(PoolError::Overflow)?;
        pool_data.token_reserve = pool_data
            .token_reserve
            .checked_add(amount_token)
            .ok_or(PoolError::Overflow)?;
        pool_data.total_lp_supply = pool_data
            .total_lp_supply
            .checked_add(minted)
            .ok_or(PoolError::Overflow)?;

        if !pool_data.is_solvent() {
            msg!("Pool AddLiq: solvency bookkeeping broke, aborting");
            return Err(PoolError::InvariantViolated.into());
        }
        pool_data.serialize(&mut &mut pool_state_acc.data.borrow_mut()[..])?;

        Ok(())
    }

    fn process_remove_liquidity(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        amount_lp: u64,
    ) -> ProgramResult {
        msg!("Pool RemLiq: Processing");
        let acc_iter = &mut accounts.iter();
        let user_acc = next_account_info(acc_iter)?; // 0
        let pool_state_acc = next_account_info(acc_iter)?; // 1
        let vault_acc = next_account_info(acc_iter)?; // 2
        let lp_mint_acc = next_account_info(acc_iter)?; // 3
        let user_token_acc = next_account_info(acc_iter)?; // 4
        let user_lp_acc = next_account_info(acc_iter)?; // 5
        let token_prog_acc = next_account_info(acc_iter)?; // 6

        // --- Load state & basic checks ---
        if !user_acc.is_signer {
            return Err(PoolError::MissingRequiredSignature.into());
        }
        validate_program_id(token_prog_acc, &spl_token::id())?;
        let mut pool_data = LiquidityPool::try_from_slice(&pool_state_acc.data.borrow())?;

        // --- PDA re-derivation ---
        let (expected_pda, _bump) = find_pool_address(program_id, &pool_data.token_mint);
        if &expected_pda != pool_state_acc.key {
            return Err(PoolError::IncorrectPoolPda.into());
        }

        // --- Account key checks vs pool state ---
        if vault_acc.key != &pool_data.vault {
            return Err(PoolError::VaultMismatch.into());
        }
        if lp_mint_acc.key != &pool_data.lp_mint {
            return Err(PoolError::LpMintMismatch.into());
        }

        // --- Input amount checks ---
        if amount_lp == 0 {
            return Err(PoolError::ZeroAmount.into());
        }
        if amount_lp > pool_data.total_lp_supply {
            return Err(PoolError::InsufficientLpBalance.into());
        }

        // --- Account data validations ---
        let vault_data = validate_pool_vault(vault_acc, &expected_pda, &pool_data.token_mint)?;
        let lp_mint_data = validate_mint_basic(lp_mint_acc)?;
        validate_lp_mint_properties(&lp_mint_data, &expected_pda)?;
        let _user_token_data =
            validate_token_account_basic(user_token_acc, user_acc.key, &pool_data.token_mint)?;
        let user_lp_data =
            validate_token_account_basic(user_lp_acc, user_acc.key, &pool_data.lp_mint)?;
        if user_lp_data.amount < amount_lp {
            msg!(
                "User LP balance {} insufficient for burning {}",
                user_lp_data.amount,
                amount_lp
            );
            return Err(PoolError::InsufficientLpBalance.into());
        }

        // --- Payout math, before any ledger movement ---
        let (native_out, token_out) = math::withdrawal_amounts(
            pool_data.native_reserve,
            pool_data.token_reserve,
            pool_data.total_lp_supply,
            amount_lp,
        )?;
        msg!(
            "Pool RemLiq: burning {} LP units pays ({}, {})",
            amount_lp,
            native_out,
            token_out
        );

        // Custody must cover the payout; a shortfall means the solvency
        // bookkeeping broke and is fatal, never corrected here.
        if token_out > vault_data.amount || native_out > pool_state_acc.lamports() {
            return Err(PoolError::InsufficientReserves.into());
        }

        // Burn the user's claim - user must authorize this
        let burn_ix = spl_token::instruction::burn(
            token_prog_acc.key,
            user_lp_acc.key,
            &pool_data.lp_mint,
            user_acc.key,
            &[],
            amount_lp,
        )?;
        invoke(
            &burn_ix,
            &[
                user_lp_acc.clone(),
                lp_mint_acc.clone(),
                user_acc.clone(),
                token_prog_acc.clone(),
            ],
        )?;

        // Token leg: vault -> user, signed as the pool PDA
        let bump_arr = [pool_data.bump];
        let sign_seeds = get_pool_seeds(&pool_data.token_mint, &bump_arr);
        let transfer_ix = spl_token::instruction::transfer(
            token_prog_acc.key,
            vault_acc.key,
            user_token_acc.key,
            pool_state_acc.key,
            &[],
            token_out,
        )?;
        invoke_signed(
            &transfer_ix,
            &[
                vault_acc.clone(),
                user_token_acc.clone(),
                pool_state_acc.clone(),
                token_prog_acc.clone(),
            ],
            &[&sign_seeds],
        )?;

        // Native leg: direct lamport move, the pool account is program-owned
        **pool_state_acc.try_borrow_mut_lamports()? = pool_state_acc
            .lamports()
            .checked_sub(native_out)
            .ok_or(PoolError::InsufficientReserves)?;
        **user_acc.try_borrow_mut_lamports()? = user_acc
            .lamports()
            .checked_add(native_out)
            .ok_or(PoolError::Overflow)?;

        // --- Counter commit ---
        pool_data.native_reserve = pool_data
            .native_reserve
            .checked_sub(native_out)
            .ok_or(PoolError::InvariantViolated)?;
        pool_data.token_reserve = pool_data
            .token_reserve
            .checked_sub(token_out)
            .ok_or(PoolError::InvariantViolated)?;
        pool_data.total_lp_supply = pool_data
            .total_lp_supply
            .checked_sub(amount_lp)
            .ok_or(PoolError::InvariantViolated)?;

        if !pool_data.is_solvent() {
            msg!("Pool RemLiq: solvency bookkeeping broke, aborting");
            return Err(PoolError::InvariantViolated.into());
        }
        pool_data.serialize(&mut &mut pool_state_acc.data.borrow_mut()[..])?;

        Ok(())
    }
}
